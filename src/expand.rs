//! Logical page expansion
//!
//! Flattens the validated item list into the ordered page-reference
//! sequence the planner works on: one reference per contained document
//! page, one per image, one per blank.

use crate::render::{DocumentCache, pdfium_for_items};
use crate::types::*;
use pdfium_render::prelude::*;

/// Expand items into page references, binding Pdfium only if a document
/// item is present.
pub fn expand_pages(items: &[Item]) -> Result<Vec<PageRef>> {
    let pdfium = pdfium_for_items(items)?;
    expand_pages_with(items, pdfium.as_ref())
}

/// Expansion core for callers that already hold a Pdfium binding.
///
/// Each document is opened at most once per call; all handles live in a
/// call-scoped cache that is dropped before returning, on success and
/// failure alike.
pub fn expand_pages_with(items: &[Item], pdfium: Option<&Pdfium>) -> Result<Vec<PageRef>> {
    let mut cache = DocumentCache::new(pdfium);
    let mut pages = Vec::new();

    for (item_index, item) in items.iter().enumerate() {
        match item.kind {
            ItemKind::Blank => pages.push(PageRef {
                item_index: Some(item_index),
                page_index: None,
                is_blank: true,
            }),
            ItemKind::Image => pages.push(PageRef {
                item_index: Some(item_index),
                page_index: None,
                is_blank: false,
            }),
            ItemKind::Document => {
                let path = item.location.as_deref().ok_or_else(|| {
                    BookletError::FileNotFound(item.display_name.clone())
                })?;
                let page_count = cache.open(path)?.pages().len() as usize;
                for page_index in 0..page_count {
                    pages.push(PageRef {
                        item_index: Some(item_index),
                        page_index: Some(page_index),
                        is_blank: false,
                    });
                }
            }
        }
    }

    Ok(pages)
}
