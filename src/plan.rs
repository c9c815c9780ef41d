//! Imposition planning
//!
//! Pure functions mapping a logical page sequence plus layout options to an
//! ordered sequence of two-slot spreads. Padding only ever appends synthetic
//! blanks; real pages are never removed or reordered.
//!
//! ```text
//! Saddle-stitch booklet (8 pages):
//!
//! Sheet 1 front: [8 | 1]    Sheet 1 back: [2 | 7]
//! Sheet 2 front: [6 | 3]    Sheet 2 back: [4 | 5]
//! ```

use crate::options::{GenerateOptions, LayoutMode};
use crate::types::{PageRef, Spread};

/// Pad to an even page count by appending synthetic blanks.
pub fn pad_to_even(mut pages: Vec<PageRef>) -> Vec<PageRef> {
    if pages.len() % 2 == 1 {
        pages.push(PageRef::blank());
    }
    pages
}

/// Pad to a page count divisible by 4 by appending synthetic blanks.
pub fn pad_to_multiple_of_4(mut pages: Vec<PageRef>) -> Vec<PageRef> {
    while pages.len() % 4 != 0 {
        pages.push(PageRef::blank());
    }
    pages
}

/// Plan spreads for the interactive preview: natural reading order, two
/// pages per sheet. With `cover_preview` a synthetic blank is prepended to
/// simulate a cover offset.
pub fn preview_spreads(pages: &[PageRef], cover_preview: bool) -> Vec<Spread> {
    let mut padded = Vec::with_capacity(pages.len() + 2);
    if cover_preview {
        padded.push(PageRef::blank());
    }
    padded.extend_from_slice(pages);
    let padded = pad_to_even(padded);

    padded
        .chunks(2)
        .map(|pair| Spread {
            left: Some(pair[0]),
            right: Some(pair[1]),
        })
        .collect()
}

/// Plan spreads for two-up output.
///
/// Delegates to [`preview_spreads`]: the preview and the final two-up output
/// are planned by the same function, which is what guarantees the preview
/// shows exactly what gets printed.
pub fn two_up_spreads(pages: &[PageRef], cover_preview: bool) -> Vec<Spread> {
    preview_spreads(pages, cover_preview)
}

/// Plan spreads for a saddle-stitch booklet.
///
/// After padding to a multiple of 4, each group of 4 pages yields one
/// physical sheet: front `(p[n-1-2i], p[2i])`, then back
/// `(p[1+2i], p[n-2-2i])`. Spreads are emitted in printing order —
/// sheet 1 front, sheet 1 back, sheet 2 front, ... — which is the order a
/// manual-duplex printer must follow for correct folding.
pub fn booklet_spreads(pages: &[PageRef]) -> Vec<Spread> {
    let padded = pad_to_multiple_of_4(pages.to_vec());
    let n = padded.len();

    let mut spreads = Vec::with_capacity(n / 2);
    for i in 0..n / 4 {
        spreads.push(Spread {
            left: Some(padded[n - 1 - 2 * i]),
            right: Some(padded[2 * i]),
        });
        spreads.push(Spread {
            left: Some(padded[1 + 2 * i]),
            right: Some(padded[n - 2 - 2 * i]),
        });
    }
    spreads
}

/// Dispatch on the layout mode. `cover_preview` has no effect on booklets.
pub fn plan_spreads(pages: &[PageRef], options: &GenerateOptions) -> Vec<Spread> {
    match options.layout_mode {
        LayoutMode::Booklet => booklet_spreads(pages),
        LayoutMode::TwoUp => two_up_spreads(pages, options.cover_preview),
    }
}
