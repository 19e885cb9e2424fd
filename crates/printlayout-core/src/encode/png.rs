use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgb, EncodeError};

/// Encode an RGB sheet buffer as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lossless() {
        let pixels: Vec<u8> = (0..5 * 7 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let png = encode_png(&pixels, 5, 7).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 7));
        assert_eq!(decoded.as_raw(), &pixels);
    }

    #[test]
    fn test_zero_width() {
        assert!(matches!(
            encode_png(&[], 0, 4),
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        ));
    }

    proptest! {
        #[test]
        fn prop_any_valid_sheet_encodes(width in 1u32..32, height in 1u32..32, fill in any::<u8>()) {
            let pixels = vec![fill; (width * height * 3) as usize];
            let png = encode_png(&pixels, width, height).unwrap();
            prop_assert_eq!(&png[1..4], b"PNG");
        }
    }
}
