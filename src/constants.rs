//! Shared constants for the imposition pipeline.

// =============================================================================
// Output Sheet Geometry
// =============================================================================

/// Output sheet width in points (A4 landscape)
pub const A4_LANDSCAPE_WIDTH_PT: f32 = 842.0;

/// Output sheet height in points (A4 landscape)
pub const A4_LANDSCAPE_HEIGHT_PT: f32 = 595.0;

/// A4 landscape width in inches, used to size blank rasters at a given DPI
pub const A4_LANDSCAPE_WIDTH_IN: f32 = 11.69;

/// A4 landscape height in inches
pub const A4_LANDSCAPE_HEIGHT_IN: f32 = 8.27;

/// PDF user-space units per inch
pub const POINTS_PER_INCH: f32 = 72.0;

// =============================================================================
// Pipeline
// =============================================================================

/// Default resolution for interactive spread previews
pub const PREVIEW_DPI: u32 = 110;

/// A log line is emitted on the first spread, the last spread, and every
/// `LOG_INTERVAL_SPREADS`th spread in between.
pub const LOG_INTERVAL_SPREADS: usize = 10;
