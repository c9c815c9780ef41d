//! Interactive spread preview
//!
//! Renders one planned spread onto a white A4-landscape canvas, using the
//! same planner output and the same fit routine as the final output, so
//! the preview shows exactly what gets printed.

use crate::compose::fit_rect;
use crate::render::{DocumentCache, blank_raster, pdfium_for_items, rasterize_page};
use crate::types::*;
use image::RgbImage;
use image::imageops::{self, FilterType};

/// Render a two-up preview of one spread at the given resolution
/// (see [`crate::constants::PREVIEW_DPI`] for the interactive default).
/// Uses its own call-scoped document cache, released before returning.
pub fn render_spread_preview(
    items: &[Item],
    spread: &Spread,
    dpi: u32,
    grayscale: bool,
) -> Result<RgbImage> {
    let pdfium = pdfium_for_items(items)?;
    let mut cache = DocumentCache::new(pdfium.as_ref());

    let mut canvas = blank_raster(dpi);
    let half_width = canvas.width() as f32 / 2.0;
    let height = canvas.height() as f32;

    let left = rasterize_page(items, spread.left.as_ref(), dpi, grayscale, &mut cache)?;
    paste_half(&mut canvas, &left, 0.0, half_width, height);

    let right = rasterize_page(items, spread.right.as_ref(), dpi, grayscale, &mut cache)?;
    paste_half(&mut canvas, &right, half_width, half_width, height);

    Ok(canvas)
}

/// Fit a raster into one half of the canvas. The fit is computed in float
/// space by the shared routine; pixels are rounded only here.
fn paste_half(canvas: &mut RgbImage, raster: &RgbImage, x_offset: f32, box_w: f32, box_h: f32) {
    let fit = fit_rect(raster.width(), raster.height(), box_w, box_h);
    let width = fit.width.round().max(1.0) as u32;
    let height = fit.height.round().max(1.0) as u32;

    let resized = imageops::resize(raster, width, height, FilterType::Triangle);
    imageops::replace(
        canvas,
        &resized,
        (x_offset + fit.x).round() as i64,
        fit.y.round() as i64,
    );
}
