//! Encoding composed sheets for download.
//!
//! Sheets are RGB, row-major, 3 bytes per pixel. PNG is lossless and the
//! right choice for cutting marks and text; JPEG keeps photo sheets small.
//!
//! ```ignore
//! use printlayout_core::encode::{encode_sheet, OutputFormat};
//!
//! let bytes = encode_sheet(&sheet, OutputFormat::Jpeg { quality: 92 })?;
//! ```

mod jpeg;
mod png;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur while encoding a sheet.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    /// Quality 1-100, clamped.
    Jpeg { quality: u8 },
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Png
    }
}

impl OutputFormat {
    /// MIME type of the encoded bytes.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// Encode a composed sheet.
pub fn encode_sheet(sheet: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = sheet.dimensions();
    match format {
        OutputFormat::Png => encode_png(sheet.as_raw(), width, height),
        OutputFormat::Jpeg { quality } => encode_jpeg(sheet.as_raw(), width, height, quality),
    }
}

/// Shared buffer checks for both encoders.
fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sheet_png() {
        let sheet = RgbImage::from_pixel(12, 18, image::Rgb([255, 255, 255]));
        let bytes = encode_sheet(&sheet, OutputFormat::Png).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_sheet_jpeg() {
        let sheet = RgbImage::from_pixel(12, 18, image::Rgb([200, 220, 240]));
        let bytes = encode_sheet(&sheet, OutputFormat::Jpeg { quality: 90 }).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg { quality: 80 }.extension(), "jpg");
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
    }

    #[test]
    fn test_format_serde() {
        let format: OutputFormat =
            serde_json::from_str(r#"{ "format": "jpeg", "quality": 85 }"#).unwrap();
        assert_eq!(format, OutputFormat::Jpeg { quality: 85 });
        let format: OutputFormat = serde_json::from_str(r#"{ "format": "png" }"#).unwrap();
        assert_eq!(format, OutputFormat::Png);
    }

    #[test]
    fn test_validate_rgb() {
        assert!(validate_rgb(&[0; 12], 2, 2).is_ok());
        assert!(matches!(
            validate_rgb(&[0; 11], 2, 2),
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            validate_rgb(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (5) must be non-zero"
        );
    }
}
