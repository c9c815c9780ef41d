//! Pipeline orchestration
//!
//! Drives the planned spread sequence through the rasterizer and
//! compositor: strictly sequential, cancellable at spread boundaries, and
//! published atomically so the destination path is only ever created or
//! replaced by a complete result.

use crate::compose::SpreadWriter;
use crate::constants::LOG_INTERVAL_SPREADS;
use crate::expand::expand_pages_with;
use crate::options::GenerateOptions;
use crate::plan::plan_spreads;
use crate::render::{DocumentCache, pdfium_for_items, rasterize_page};
use crate::types::*;
use lopdf::Document;
use std::fs;
use std::path::{Path, PathBuf};

pub type ProgressFn = Box<dyn Fn(usize, usize) + Send>;
pub type LogFn = Box<dyn Fn(&str) + Send>;
pub type CancelFn = Box<dyn Fn() -> bool + Send>;

/// The three one-directional signals a caller may attach to a pass.
/// Channel senders wrap trivially; no assumption is made about the calling
/// thread's execution model.
#[derive(Default)]
pub struct JobCallbacks {
    pub progress: Option<ProgressFn>,
    pub log: Option<LogFn>,
    pub cancel: Option<CancelFn>,
}

impl JobCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, f: impl Fn(usize, usize) + Send + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn on_log(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.log = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl Fn() -> bool + Send + 'static) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }

    fn emit_progress(&self, current: usize, total: usize) {
        if let Some(progress) = &self.progress {
            progress(current, total);
        }
    }

    fn emit_log(&self, line: &str) {
        if let Some(log) = &self.log {
            log(line);
        }
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.as_ref().is_some_and(|cancel| cancel())
    }
}

/// Run one generation pass off the caller's thread.
///
/// A worker panic is redacted like any other internal failure; the join
/// error never reaches the caller verbatim.
pub async fn generate(
    items: Vec<Item>,
    options: GenerateOptions,
    output_path: PathBuf,
    callbacks: JobCallbacks,
) -> Result<()> {
    tokio::task::spawn_blocking(move || generate_sync(&items, &options, &output_path, &callbacks))
        .await
        .map_err(|e| redact_internal(BookletError::TaskJoin(e)))?
}

/// The sequential generation core. One pass per invocation; terminal
/// outcomes are `Ok`, `Canceled`, or a classified error, with internal
/// failures redacted to a generic one after being logged.
pub fn generate_sync(
    items: &[Item],
    options: &GenerateOptions,
    output_path: &Path,
    callbacks: &JobCallbacks,
) -> Result<()> {
    run_pass(items, options, output_path, callbacks).map_err(redact_internal)
}

fn redact_internal(error: BookletError) -> BookletError {
    if error.is_user_facing() {
        error
    } else {
        log::error!("generation failed: {error}");
        BookletError::Generation
    }
}

fn run_pass(
    items: &[Item],
    options: &GenerateOptions,
    output_path: &Path,
    callbacks: &JobCallbacks,
) -> Result<()> {
    let pdfium = pdfium_for_items(items)?;
    let pages = expand_pages_with(items, pdfium.as_ref())?;
    let spreads = plan_spreads(&pages, options);
    let profile = options.quality_profile();

    // Dropped at the end of the pass on every exit path
    let mut cache = DocumentCache::new(pdfium.as_ref());
    let mut writer = SpreadWriter::new();
    let total = spreads.len();

    for (index, spread) in spreads.iter().enumerate() {
        // Cancellation is polled only at spread boundaries
        if callbacks.cancel_requested() {
            return Err(BookletError::Canceled);
        }

        let left = rasterize_page(
            items,
            spread.left.as_ref(),
            profile.dpi,
            options.grayscale,
            &mut cache,
        )?;
        let right = rasterize_page(
            items,
            spread.right.as_ref(),
            profile.dpi,
            options.grayscale,
            &mut cache,
        )?;
        writer.push_spread(&left, &right, profile.jpeg_quality)?;

        let done = index + 1;
        callbacks.emit_progress(done, total);
        if done == 1 || done == total || done % LOG_INTERVAL_SPREADS == 0 {
            callbacks.emit_log(&format!("processed spread {done}/{total}"));
        }
    }

    let mut document = writer.finish();
    publish_atomic(&mut document, output_path)
}

/// Save next to the destination, then rename into place. The destination
/// is untouched unless the rename succeeds; a leftover temp file is
/// removed on failure.
fn publish_atomic(document: &mut Document, output_path: &Path) -> Result<()> {
    let file_name = output_path
        .file_name()
        .ok_or_else(|| BookletError::InvalidOutput(output_path.display().to_string()))?;
    let out_dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&out_dir)?;

    let tmp_path = out_dir.join(format!(".tmp_{}", file_name.to_string_lossy()));
    let result = save_and_rename(document, &tmp_path, output_path);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn save_and_rename(document: &mut Document, tmp_path: &Path, output_path: &Path) -> Result<()> {
    document.save(tmp_path)?;
    fs::rename(tmp_path, output_path)?;
    Ok(())
}
