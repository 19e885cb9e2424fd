//! Physical units and device-pixel conversion.
//!
//! Millimetres are the canonical unit everywhere past the catalog boundary.
//! Presets authored in centimetres or inches are converted once, when they
//! are registered, so the planner never has to know where a number came from.

use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Print resolution for photo and card sheets.
pub const DEFAULT_DPI: u32 = 300;

/// Unit a preset dimension is authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    #[serde(alias = "millimeter")]
    Mm,
    #[serde(alias = "centimeter")]
    Cm,
    #[serde(alias = "inch")]
    In,
}

impl Unit {
    /// Convert a value in this unit to millimetres.
    #[inline]
    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Unit::Mm => value,
            Unit::Cm => value * 10.0,
            Unit::In => value * MM_PER_INCH,
        }
    }
}

/// Convert a length in millimetres to device pixels at `dpi`.
///
/// Rounds to the nearest pixel. Negative and non-finite lengths map to 0.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    let px = (mm / MM_PER_INCH * dpi as f64).round();
    if px.is_finite() && px > 0.0 {
        px as u32
    } else {
        0
    }
}

/// Same as [`mm_to_px`] but keeps the sign, for offsets that may fall
/// outside the sheet (cut marks drawn beyond an item's corner).
#[inline]
pub(crate) fn mm_to_px_signed(mm: f64, dpi: u32) -> i64 {
    let px = (mm / MM_PER_INCH * dpi as f64).round();
    if px.is_finite() {
        px as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Unit::Mm.to_mm(85.6), 85.6);
        assert!((Unit::Cm.to_mm(21.0) - 210.0).abs() < 1e-9);
        assert!((Unit::In.to_mm(6.0) - 152.4).abs() < 1e-9);
    }

    #[test]
    fn test_mm_to_px_at_300_dpi() {
        // 4 x 6 inch sheet at 300 DPI is 1200 x 1800 px
        assert_eq!(mm_to_px(101.6, DEFAULT_DPI), 1200);
        assert_eq!(mm_to_px(152.4, DEFAULT_DPI), 1800);
        // A4 at 300 DPI
        assert_eq!(mm_to_px(210.0, DEFAULT_DPI), 2480);
        assert_eq!(mm_to_px(297.0, DEFAULT_DPI), 3508);
    }

    #[test]
    fn test_mm_to_px_clamps_negative() {
        assert_eq!(mm_to_px(-5.0, DEFAULT_DPI), 0);
        assert_eq!(mm_to_px(f64::NAN, DEFAULT_DPI), 0);
        assert_eq!(mm_to_px_signed(-2.0, DEFAULT_DPI), -24);
    }

    #[test]
    fn test_unit_serde_names() {
        let unit: Unit = serde_json::from_str("\"cm\"").unwrap();
        assert_eq!(unit, Unit::Cm);
        let unit: Unit = serde_json::from_str("\"inch\"").unwrap();
        assert_eq!(unit, Unit::In);
        assert_eq!(serde_json::to_string(&Unit::Mm).unwrap(), "\"mm\"");
    }
}
