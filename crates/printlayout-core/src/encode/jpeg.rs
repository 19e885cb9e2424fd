//! JPEG output for photo sheets.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgb, EncodeError};

/// Encode an RGB sheet buffer as JPEG.
///
/// `quality` is clamped to 1-100. Print shops generally want 90 or above;
/// anything lower shows blocking around cut marks.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
