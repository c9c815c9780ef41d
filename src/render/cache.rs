//! Pdfium binding and the pass-scoped document cache.

use crate::types::*;
use pdfium_render::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// Initialize Pdfium, trying the vendored library first, then falling back
/// to the system library.
pub fn init_pdfium() -> Result<Pdfium> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| BookletError::Render(format!("failed to bind Pdfium: {e}")))
}

/// Bind Pdfium only when the item list actually contains a document.
/// Image- and blank-only jobs never touch the library.
pub fn pdfium_for_items(items: &[Item]) -> Result<Option<Pdfium>> {
    if items.iter().any(|item| item.kind == ItemKind::Document) {
        init_pdfium().map(Some)
    } else {
        Ok(None)
    }
}

/// Open a document and reject the protected/encrypted ones with a
/// classified error before any page is touched.
pub fn open_document_checked<'a>(pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>> {
    pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| classify_load_error(e, path))
}

/// Map a Pdfium load failure to a classified error: password and
/// security failures are reported as protected, everything else as
/// unopenable with the path.
fn classify_load_error(error: PdfiumError, path: &Path) -> BookletError {
    match error {
        PdfiumError::PdfiumLibraryInternalError(
            PdfiumInternalError::PasswordError | PdfiumInternalError::SecurityError,
        ) => BookletError::Protected,
        e => {
            log::debug!("pdfium failed to load {}: {e}", path.display());
            BookletError::CannotOpen(path.display().to_string())
        }
    }
}

/// Per-pass cache of opened documents, keyed by source location.
///
/// Exclusively owned by one pipeline pass (or one preview render call);
/// every document is opened at most once per pass and all handles are
/// released when the cache goes out of scope, on every exit path.
pub struct DocumentCache<'a> {
    pdfium: Option<&'a Pdfium>,
    documents: HashMap<PathBuf, PdfDocument<'a>>,
}

impl<'a> DocumentCache<'a> {
    pub fn new(pdfium: Option<&'a Pdfium>) -> Self {
        Self {
            pdfium,
            documents: HashMap::new(),
        }
    }

    /// Look up a document, opening and validating it on first use.
    pub fn open(&mut self, path: &Path) -> Result<&PdfDocument<'a>> {
        match self.documents.entry(path.to_path_buf()) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let pdfium = self.pdfium.ok_or_else(|| {
                    BookletError::Render(format!(
                        "no Pdfium binding in this pass, cannot open {}",
                        path.display()
                    ))
                })?;
                log::debug!("opening document {}", path.display());
                Ok(slot.insert(open_document_checked(pdfium, path)?))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
