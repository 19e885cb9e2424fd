//! Print specifications reported alongside a generated sheet.

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemSpec, PaperSpec};
use crate::planner::LayoutResult;
use crate::units::mm_to_px;

/// Bleed applied to cards when the caller asks for one.
pub const CARD_BLEED_MM: f64 = 3.0;

/// Inset from the trimmed edge inside which card content is safe.
pub const SAFE_AREA_MM: f64 = 5.0;

/// Physical and pixel dimensions of a planned sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintSpecifications {
    /// Sheet size in mm.
    pub paper_width: f64,
    pub paper_height: f64,
    /// Item footprint in mm, including bleed.
    pub item_width: f64,
    pub item_height: f64,
    /// Bleed on each side of an item, mm.
    pub bleed: f64,
    /// Safe-area inset from the trimmed edge, mm.
    pub safe_area: f64,
    /// Width and height of the safe content box, mm.
    pub safe_width: f64,
    pub safe_height: f64,
    pub total_items: u32,
    pub dpi: u32,
    /// Sheet size in pixels at `dpi`.
    pub sheet_width_px: u32,
    pub sheet_height_px: u32,
    /// Item footprint in pixels at `dpi`.
    pub item_width_px: u32,
    pub item_height_px: u32,
}

impl PrintSpecifications {
    pub fn new(paper: &PaperSpec, item: &ItemSpec, layout: &LayoutResult, dpi: u32) -> Self {
        let item_width = item.footprint_width();
        let item_height = item.footprint_height();
        Self {
            paper_width: paper.width,
            paper_height: paper.height,
            item_width,
            item_height,
            bleed: item.bleed,
            safe_area: SAFE_AREA_MM,
            safe_width: (item.width - 2.0 * SAFE_AREA_MM).max(0.0),
            safe_height: (item.height - 2.0 * SAFE_AREA_MM).max(0.0),
            total_items: layout.total_items,
            dpi,
            sheet_width_px: mm_to_px(paper.width, dpi),
            sheet_height_px: mm_to_px(paper.height, dpi),
            item_width_px: mm_to_px(item_width, dpi),
            item_height_px: mm_to_px(item_height, dpi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{plan, GridRequest};
    use crate::units::DEFAULT_DPI;

    #[test]
    fn test_card_sheet_specifications() {
        let paper = PaperSpec::new("4x6", 101.6, 152.4);
        let card = ItemSpec::new("CR80", 85.6, 53.98).with_bleed(CARD_BLEED_MM);
        let layout = plan(&paper, &card, &GridRequest::explicit_with_spacing(2, 1, 5.0)).unwrap();
        let specs = PrintSpecifications::new(&paper, &card, &layout, DEFAULT_DPI);

        assert!((specs.item_width - 91.6).abs() < 1e-9);
        assert!((specs.item_height - 59.98).abs() < 1e-9);
        assert_eq!(specs.bleed, 3.0);
        assert_eq!(specs.total_items, 2);
        assert_eq!(specs.sheet_width_px, 1200);
        assert_eq!(specs.sheet_height_px, 1800);
        // 91.6mm at 300 DPI = 1081.9 px
        assert_eq!(specs.item_width_px, 1082);
        assert!((specs.safe_width - 75.6).abs() < 1e-9);
    }

    #[test]
    fn test_safe_area_never_negative() {
        let paper = PaperSpec::new("sheet", 100.0, 100.0);
        let stamp = ItemSpec::new("tiny", 8.0, 8.0);
        let layout = plan(&paper, &stamp, &GridRequest::auto_fit()).unwrap();
        let specs = PrintSpecifications::new(&paper, &stamp, &layout, 150);
        assert_eq!(specs.safe_width, 0.0);
        assert_eq!(specs.safe_height, 0.0);
        assert_eq!(specs.dpi, 150);
    }
}
