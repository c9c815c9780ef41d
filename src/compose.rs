//! Spread compositing
//!
//! Fits two rasters into the left and right halves of one landscape A4
//! output page and encodes them as JPEG image XObjects. Content never
//! crosses the midline and is never distorted or cropped.

use crate::constants::{A4_LANDSCAPE_HEIGHT_PT, A4_LANDSCAPE_WIDTH_PT};
use crate::types::*;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// A placement computed by [`fit_rect`]: offset and size inside the box,
/// in the box's own units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an image into a box with uniform scale `min(box_w/w, box_h/h)`,
/// centered on both axes. One routine serves both the point-space output
/// path and the pixel-space preview path; pixel rounding happens only at
/// the preview paste site.
pub fn fit_rect(img_width: u32, img_height: u32, box_width: f32, box_height: f32) -> FitRect {
    if img_width == 0 || img_height == 0 {
        return FitRect {
            x: 0.0,
            y: 0.0,
            width: box_width,
            height: box_height,
        };
    }

    let scale = (box_width / img_width as f32).min(box_height / img_height as f32);
    let width = img_width as f32 * scale;
    let height = img_height as f32 * scale;
    FitRect {
        x: (box_width - width) / 2.0,
        y: (box_height - height) / 2.0,
        width,
        height,
    }
}

/// Incrementally writes composed spreads into an output document.
///
/// Pages are fixed at 842x595pt (A4 landscape); `finish` assembles the
/// page tree and catalog.
pub struct SpreadWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl SpreadWriter {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Compose one spread onto a new output page. Both halves share the
    /// same JPEG quality.
    pub fn push_spread(
        &mut self,
        left: &RgbImage,
        right: &RgbImage,
        jpeg_quality: u8,
    ) -> Result<()> {
        let half_width = A4_LANDSCAPE_WIDTH_PT / 2.0;

        let left_id = add_jpeg_xobject(&mut self.document, left, jpeg_quality)?;
        let right_id = add_jpeg_xobject(&mut self.document, right, jpeg_quality)?;

        let left_fit = fit_rect(left.width(), left.height(), half_width, A4_LANDSCAPE_HEIGHT_PT);
        let right_fit = fit_rect(
            right.width(),
            right.height(),
            half_width,
            A4_LANDSCAPE_HEIGHT_PT,
        );

        // Image XObject space is the unit square, so the cm scale is the
        // displayed size in points.
        let content = format!(
            "q {} 0 0 {} {} {} cm /ImL Do Q\nq {} 0 0 {} {} {} cm /ImR Do Q\n",
            left_fit.width,
            left_fit.height,
            left_fit.x,
            left_fit.y,
            right_fit.width,
            right_fit.height,
            half_width + right_fit.x,
            right_fit.y,
        );
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("ImL", Object::Reference(left_id));
        xobjects.set("ImR", Object::Reference(right_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(A4_LANDSCAPE_WIDTH_PT),
                    Object::Real(A4_LANDSCAPE_HEIGHT_PT),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]));
        self.page_ids.push(page_id);
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Assemble the page tree and catalog.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.page_ids.iter().copied().map(Object::Reference).collect();
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(self.page_ids.len() as i64)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);
        self.document
    }
}

impl Default for SpreadWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a raster as a JPEG image XObject (DCTDecode, DeviceRGB).
fn add_jpeg_xobject(document: &mut Document, image: &RgbImage, quality: u8) -> Result<ObjectId> {
    let mut data = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut data, quality);
    encoder.encode_image(image)?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width() as i64));
    dict.set("Height", Object::Integer(image.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    // The payload is already JPEG; recompressing the stream would corrupt it
    let mut stream = Stream::new(dict, data);
    stream.allows_compression = false;
    Ok(document.add_object(stream))
}
