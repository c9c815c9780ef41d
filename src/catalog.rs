//! Item validation
//!
//! Turns raw caller-supplied entries into typed [`Item`]s, rejecting
//! unsupported formats before any file content is decoded. Only path
//! existence and extension are inspected here.

use crate::types::*;
use std::ffi::OsStr;
use std::path::Path;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const REJECTED_CONTAINER_EXTENSIONS: &[&str] = &["heic", "heif"];

/// Validate raw entries into items, in order. Fails fast on the first
/// invalid entry; no rendering resource is opened on any path.
pub fn validate_items(raw_items: &[RawItem]) -> Result<Vec<Item>> {
    raw_items.iter().map(validate_item).collect()
}

fn validate_item(raw: &RawItem) -> Result<Item> {
    if raw.kind == ItemKind::Blank {
        return Ok(Item {
            kind: ItemKind::Blank,
            location: None,
            display_name: String::from("(blank)"),
        });
    }

    let path = raw
        .location
        .as_deref()
        .ok_or_else(|| BookletError::FileNotFound(raw.display_name.clone()))?;
    if !path.is_file() {
        return Err(BookletError::FileNotFound(path.display().to_string()));
    }

    // Consumer camera containers get a dedicated convert-first message
    if has_extension(path, REJECTED_CONTAINER_EXTENSIONS) {
        return Err(BookletError::HeicUnsupported);
    }

    match raw.kind {
        ItemKind::Document if !has_extension(path, DOCUMENT_EXTENSIONS) => {
            Err(BookletError::NotAPdf(path.display().to_string()))
        }
        ItemKind::Image if !has_extension(path, IMAGE_EXTENSIONS) => {
            Err(BookletError::UnsupportedImage(path.display().to_string()))
        }
        _ => Ok(Item {
            kind: raw.kind,
            location: Some(path.to_path_buf()),
            display_name: display_name_for(path),
        }),
    }
}

/// Display name = base file name, no further normalization
fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
