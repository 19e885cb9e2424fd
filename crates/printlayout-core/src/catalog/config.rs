//! Serde document describing a catalog.
//!
//! Every paper and item entry carries the unit its numbers are written in.
//! All lengths of an entry (size, margins, border, bleed) use that unit and
//! are converted to millimetres when the entry is turned into a spec.
//!
//! ```json
//! {
//!   "papers": [
//!     { "id": "A4", "unit": "cm", "width": 21, "height": 29.7, "margin": 1 }
//!   ],
//!   "items": [
//!     { "id": "35x45mm", "unit": "mm", "width": 35, "height": 45, "border_width": 2 }
//!   ],
//!   "overrides": [
//!     { "paper": "A4", "item": "35x45mm", "rows": 6, "columns": 5 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::types::{GridCounts, ItemSpec, PaperSpec};
use crate::units::Unit;

/// Top-level catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub papers: Vec<PaperEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

/// A paper preset as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    pub width: f64,
    pub height: f64,
    /// Shorthand for four equal margins. Per-side values win over it.
    #[serde(default)]
    pub margin: Option<f64>,
    #[serde(default)]
    pub margin_left: Option<f64>,
    #[serde(default)]
    pub margin_right: Option<f64>,
    #[serde(default)]
    pub margin_top: Option<f64>,
    #[serde(default)]
    pub margin_bottom: Option<f64>,
}

impl PaperEntry {
    /// Normalise to millimetres.
    pub fn to_spec(&self) -> PaperSpec {
        let unit = self.unit;
        let base = self.margin.unwrap_or(0.0);
        let side = |value: Option<f64>| unit.to_mm(value.unwrap_or(base));

        PaperSpec::new(self.id.clone(), unit.to_mm(self.width), unit.to_mm(self.height))
            .named(self.name.clone().unwrap_or_else(|| self.id.clone()))
            .with_margins(
                side(self.margin_left),
                side(self.margin_right),
                side(self.margin_top),
                side(self.margin_bottom),
            )
    }
}

/// An item preset as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default)]
    pub bleed: f64,
}

impl ItemEntry {
    /// Normalise to millimetres.
    pub fn to_spec(&self) -> ItemSpec {
        let unit = self.unit;
        ItemSpec::new(self.id.clone(), unit.to_mm(self.width), unit.to_mm(self.height))
            .named(self.name.clone().unwrap_or_else(|| self.id.clone()))
            .with_border(unit.to_mm(self.border_width))
            .with_bleed(unit.to_mm(self.bleed))
    }
}

/// A hard-coded grid for one paper/item pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub paper: String,
    pub item: String,
    pub rows: u32,
    pub columns: u32,
}

impl OverrideEntry {
    pub fn counts(&self) -> GridCounts {
        GridCounts::new(self.rows, self.columns)
    }
}
