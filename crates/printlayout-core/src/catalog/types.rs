//! Physical size types shared by the catalog, planner and renderer.
//!
//! All lengths are millimetres.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Sheet or item orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Height is at least the width.
    #[default]
    Portrait,
    /// Width is greater than the height.
    Landscape,
}

impl Orientation {
    /// Orientation of a `width` x `height` rectangle. Squares are portrait.
    #[inline]
    pub fn of(width: f64, height: f64) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// A named physical sheet with print margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSpec {
    /// Catalog id (e.g. "A4", "4R", "4x6").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sheet width in mm.
    pub width: f64,
    /// Sheet height in mm.
    pub height: f64,
    /// Left margin in mm.
    pub margin_left: f64,
    /// Right margin in mm.
    pub margin_right: f64,
    /// Top margin in mm.
    pub margin_top: f64,
    /// Bottom margin in mm.
    pub margin_bottom: f64,
}

impl PaperSpec {
    /// Create a borderless sheet. The display name defaults to the id.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            width,
            height,
            margin_left: 0.0,
            margin_right: 0.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Set the same margin on every side.
    pub fn with_uniform_margin(self, margin: f64) -> Self {
        self.with_margins(margin, margin, margin, margin)
    }

    /// Width between the left and right margins.
    #[inline]
    pub fn usable_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height between the top and bottom margins.
    #[inline]
    pub fn usable_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Current orientation of the sheet.
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    /// Return the sheet turned to `orientation`.
    ///
    /// Turning is a quarter rotation clockwise, so the margins travel with
    /// the edges they belong to: the old left margin becomes the top one.
    pub fn oriented(&self, orientation: Orientation) -> Self {
        if self.orientation() == orientation {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            width: self.height,
            height: self.width,
            margin_left: self.margin_bottom,
            margin_right: self.margin_top,
            margin_top: self.margin_left,
            margin_bottom: self.margin_right,
        }
    }

    /// Check dimensions and margins.
    ///
    /// Dimensions must be finite and positive, margins finite and
    /// non-negative, and the usable area must be non-empty.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(LayoutError::InvalidGeometry(format!(
                "paper {} has non-positive size {} x {}",
                self.id, self.width, self.height
            )));
        }
        let margins = [
            self.margin_left,
            self.margin_right,
            self.margin_top,
            self.margin_bottom,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(LayoutError::InvalidGeometry(format!(
                "paper {} has a negative or non-finite margin",
                self.id
            )));
        }
        if self.usable_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margins of paper {} leave no usable area ({} x {})",
                self.id,
                self.usable_width(),
                self.usable_height()
            )));
        }
        Ok(())
    }
}

/// A named placeable unit: a photo size or a card size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Catalog id (e.g. "35x45mm", "CR80").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Trimmed width in mm.
    pub width: f64,
    /// Trimmed height in mm.
    pub height: f64,
    /// Decorative inset border in mm. Does not change the footprint.
    #[serde(default)]
    pub border_width: f64,
    /// Bleed added on every side in mm.
    #[serde(default)]
    pub bleed: f64,
}

impl ItemSpec {
    /// Create an item with no border and no bleed.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            width,
            height,
            border_width: 0.0,
            bleed: 0.0,
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the decorative border width.
    pub fn with_border(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    /// Set the bleed added on every side.
    pub fn with_bleed(mut self, bleed: f64) -> Self {
        self.bleed = bleed;
        self
    }

    /// Width including bleed on both sides.
    #[inline]
    pub fn footprint_width(&self) -> f64 {
        self.width + 2.0 * self.bleed
    }

    /// Height including bleed on both sides.
    #[inline]
    pub fn footprint_height(&self) -> f64 {
        self.height + 2.0 * self.bleed
    }

    /// Current orientation of the item.
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    /// Return the item turned to `orientation` (width and height swapped
    /// when it does not already match).
    pub fn oriented(&self, orientation: Orientation) -> Self {
        if self.orientation() == orientation {
            return self.clone();
        }
        Self {
            width: self.height,
            height: self.width,
            ..self.clone()
        }
    }

    /// Check that the footprint is a finite, positive rectangle.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(LayoutError::InvalidGeometry(format!(
                "item {} has non-positive size {} x {}",
                self.id, self.width, self.height
            )));
        }
        if !self.bleed.is_finite() || self.bleed < 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "item {} has invalid bleed {}",
                self.id, self.bleed
            )));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "item {} has invalid border width {}",
                self.id, self.border_width
            )));
        }
        Ok(())
    }
}

/// A row x column count pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCounts {
    pub rows: u32,
    pub columns: u32,
}

impl GridCounts {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_area() {
        let paper = PaperSpec::new("A4", 210.0, 297.0).with_uniform_margin(10.0);
        assert_eq!(paper.usable_width(), 190.0);
        assert_eq!(paper.usable_height(), 277.0);
        assert!(paper.validate().is_ok());
    }

    #[test]
    fn test_margins_consuming_sheet_are_invalid() {
        let paper = PaperSpec::new("narrow", 20.0, 100.0).with_margins(10.0, 10.0, 0.0, 0.0);
        assert!(matches!(
            paper.validate(),
            Err(LayoutError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_negative_margin_is_invalid() {
        let paper = PaperSpec::new("odd", 100.0, 100.0).with_margins(-1.0, 0.0, 0.0, 0.0);
        assert!(paper.validate().is_err());
    }

    #[test]
    fn test_paper_orientation_rotates_margins() {
        let paper = PaperSpec::new("4x6", 101.6, 152.4).with_margins(1.0, 2.0, 3.0, 4.0);
        assert_eq!(paper.orientation(), Orientation::Portrait);

        let landscape = paper.oriented(Orientation::Landscape);
        assert_eq!(landscape.width, 152.4);
        assert_eq!(landscape.height, 101.6);
        assert_eq!(landscape.margin_top, 1.0);
        assert_eq!(landscape.margin_bottom, 2.0);
        assert_eq!(landscape.margin_right, 3.0);
        assert_eq!(landscape.margin_left, 4.0);
        // Usable area is preserved, just transposed
        assert!((landscape.usable_width() - paper.usable_height()).abs() < 1e-9);
        assert!((landscape.usable_height() - paper.usable_width()).abs() < 1e-9);

        // Already landscape: unchanged
        assert_eq!(landscape.oriented(Orientation::Landscape), landscape);
    }

    #[test]
    fn test_item_footprint_includes_bleed() {
        let card = ItemSpec::new("CR80", 85.6, 53.98).with_bleed(3.0);
        assert!((card.footprint_width() - 91.6).abs() < 1e-9);
        assert!((card.footprint_height() - 59.98).abs() < 1e-9);
    }

    #[test]
    fn test_border_does_not_change_footprint() {
        let photo = ItemSpec::new("35x45mm", 35.0, 45.0).with_border(2.0);
        assert_eq!(photo.footprint_width(), 35.0);
        assert_eq!(photo.footprint_height(), 45.0);
    }

    #[test]
    fn test_item_orientation() {
        let card = ItemSpec::new("CR80", 85.6, 53.98);
        assert_eq!(card.orientation(), Orientation::Landscape);
        let portrait = card.oriented(Orientation::Portrait);
        assert_eq!(portrait.width, 53.98);
        assert_eq!(portrait.height, 85.6);
        assert_eq!(portrait.id, "CR80");
    }

    #[test]
    fn test_item_validation() {
        assert!(ItemSpec::new("ok", 10.0, 10.0).validate().is_ok());
        assert!(ItemSpec::new("zero", 0.0, 10.0).validate().is_err());
        assert!(ItemSpec::new("nan", f64::NAN, 10.0).validate().is_err());
        assert!(ItemSpec::new("bleed", 10.0, 10.0)
            .with_bleed(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_item_spec_serde_defaults() {
        let item: ItemSpec =
            serde_json::from_str(r#"{"id":"x","name":"X","width":10.0,"height":20.0}"#).unwrap();
        assert_eq!(item.bleed, 0.0);
        assert_eq!(item.border_width, 0.0);
    }
}
