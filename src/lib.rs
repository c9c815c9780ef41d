//! Two-up and saddle-stitch booklet imposition over rasterized sources.
//!
//! Takes a user-ordered list of PDF documents, raster images, and explicit
//! blanks, plans them into two-slot spreads (plain two-up or saddle-stitch
//! booklet order), rasterizes each half at a controlled resolution, and
//! composes the result into one landscape-A4 output PDF, published
//! atomically.

pub mod catalog;
pub mod compose;
pub mod constants;
pub mod expand;
#[cfg(feature = "serde")]
pub mod manifest;
mod options;
pub mod pipeline;
pub mod plan;
pub mod preview;
pub mod render;
mod stats;
mod types;

pub use catalog::validate_items;
pub use compose::{FitRect, SpreadWriter, fit_rect};
pub use expand::{expand_pages, expand_pages_with};
#[cfg(feature = "serde")]
pub use manifest::{JobManifest, run_manifest};
pub use options::*;
pub use pipeline::{JobCallbacks, generate, generate_sync};
pub use plan::{
    booklet_spreads, pad_to_even, pad_to_multiple_of_4, plan_spreads, preview_spreads,
    two_up_spreads,
};
pub use preview::render_spread_preview;
pub use render::{DocumentCache, blank_raster, rasterize_page};
pub use stats::{JobStatistics, calculate_statistics};
pub use types::*;
