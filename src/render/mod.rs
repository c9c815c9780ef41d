//! Page rasterization
//!
//! Renders one page reference into an opaque RGB raster at a target
//! resolution, independent of layout mode. Blank and out-of-range
//! references produce a plain white A4-landscape raster; images are
//! EXIF-corrected and flattened onto a white matte; document pages are
//! rendered through Pdfium at `dpi / 72` of their native point size.

mod cache;

pub use cache::{DocumentCache, init_pdfium, open_document_checked, pdfium_for_items};

use crate::constants::{A4_LANDSCAPE_HEIGHT_IN, A4_LANDSCAPE_WIDTH_IN, POINTS_PER_INCH};
use crate::types::*;
use image::{DynamicImage, ImageDecoder, ImageReader, Rgb, RgbImage};
use pdfium_render::prelude::*;
use std::path::Path;

/// Plain white raster sized to A4 landscape at the given resolution.
pub fn blank_raster(dpi: u32) -> RgbImage {
    let width = (A4_LANDSCAPE_WIDTH_IN * dpi as f32).round() as u32;
    let height = (A4_LANDSCAPE_HEIGHT_IN * dpi as f32).round() as u32;
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

/// Rasterize one page reference.
///
/// Documents are looked up in the supplied pass-scoped cache and opened on
/// first use with the same validation as the expander. The result is always
/// 3-channel RGB, even when `grayscale` desaturates it.
pub fn rasterize_page(
    items: &[Item],
    page: Option<&PageRef>,
    dpi: u32,
    grayscale: bool,
    cache: &mut DocumentCache<'_>,
) -> Result<RgbImage> {
    let target = match page {
        Some(p) if !p.is_blank => p,
        _ => return Ok(apply_grayscale(blank_raster(dpi), grayscale)),
    };

    // Synthetic refs carry no item index and render as blanks
    let item = match target.item_index.and_then(|index| items.get(index)) {
        Some(item) => item,
        None => return Ok(apply_grayscale(blank_raster(dpi), grayscale)),
    };

    let raster = match (&item.kind, item.location.as_deref()) {
        (ItemKind::Blank, _) | (_, None) => blank_raster(dpi),
        (ItemKind::Image, Some(path)) => decode_image(path)?,
        (ItemKind::Document, Some(path)) => {
            render_document_page(cache, path, target.page_index.unwrap_or(0), dpi)?
        }
    };

    Ok(apply_grayscale(raster, grayscale))
}

/// Decode an image file to opaque RGB: embedded orientation metadata is
/// applied before any other transform, then palette/alpha pixels are
/// composited onto a white matte.
fn decode_image(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut decoded = DynamicImage::from_decoder(decoder)?;
    decoded.apply_orientation(orientation);
    Ok(flatten_onto_white(decoded))
}

fn render_document_page(
    cache: &mut DocumentCache<'_>,
    path: &Path,
    page_index: usize,
    dpi: u32,
) -> Result<RgbImage> {
    let document = cache.open(path)?;
    let page = document.pages().get(page_index as u16).map_err(|e| {
        BookletError::Render(format!(
            "cannot load page {page_index} of {}: {e}",
            path.display()
        ))
    })?;

    let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);
    let bitmap = page.render_with_config(&config).map_err(|e| {
        BookletError::Render(format!(
            "cannot render page {page_index} of {}: {e}",
            path.display()
        ))
    })?;

    // Pdfium clears to white before rendering, so dropping the alpha
    // channel here yields the same opaque result as rendering without one.
    Ok(bitmap.as_image().into_rgb8())
}

fn flatten_onto_white(image: DynamicImage) -> RgbImage {
    if let DynamicImage::ImageRgb8(rgb) = image {
        return rgb;
    }

    let rgba = image.into_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in flat.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        for channel in 0..3 {
            dst[channel] = ((src[channel] as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        }
    }
    flat
}

/// Desaturate, then re-expand to 3 channels so downstream compositing
/// always deals with one pixel format.
fn apply_grayscale(raster: RgbImage, grayscale: bool) -> RgbImage {
    if grayscale {
        DynamicImage::ImageRgb8(raster).grayscale().to_rgb8()
    } else {
        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blank_raster_is_a4_landscape_at_dpi() {
        let raster = blank_raster(220);
        assert_eq!(raster.width(), (11.69f32 * 220.0).round() as u32);
        assert_eq!(raster.height(), (8.27f32 * 220.0).round() as u32);
        assert_eq!(raster.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn alpha_is_composited_onto_white() {
        let mut rgba = image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0])); // fully transparent
        rgba.put_pixel(1, 0, Rgba([0, 0, 0, 255])); // opaque black

        let flat = flatten_onto_white(DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn grayscale_output_stays_three_channel() {
        let raster = RgbImage::from_pixel(4, 4, Rgb([200, 50, 10]));
        let gray = apply_grayscale(raster, true);
        let pixel = gray.get_pixel(0, 0);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn synthetic_refs_render_blank_without_any_item() {
        let mut cache = DocumentCache::new(None);
        let raster =
            rasterize_page(&[], Some(&PageRef::blank()), 72, false, &mut cache).unwrap();
        assert_eq!(raster.width(), (11.69f32 * 72.0).round() as u32);
        assert!(cache.is_empty());
    }
}
