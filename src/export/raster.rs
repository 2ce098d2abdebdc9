//! Decoding of attached figures for the PDF.

use crate::errors::{AppError, AppResult};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

/// Box every figure is scaled into, in points.
pub const MAX_FIGURE_W: f32 = 450.0;
pub const MAX_FIGURE_H: f32 = 300.0;

/// Zlib-compressed 8-bit RGB samples, ready for a FlateDecode XObject.
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub fn rasterize(bytes: &[u8]) -> AppResult<Raster> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AppError::Export(format!("cannot decode image: {e}")))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw())?;
    let data = encoder.finish()?;

    Ok(Raster {
        width,
        height,
        data,
    })
}

/// Media type sniffed from the file content, if it is an image this build
/// can decode.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .filter(|f| f.reading_enabled())
        .map(|f| f.to_mime_type())
}

/// Scale `w`×`h` down (never up) to fit inside `max_w`×`max_h`.
pub fn fit(w: u32, h: u32, max_w: f32, max_h: f32) -> (f32, f32) {
    let (w, h) = (w.max(1) as f32, h.max(1) as f32);
    let scale = (max_w / w).min(max_h / h).min(1.0);
    (w * scale, h * scale)
}
