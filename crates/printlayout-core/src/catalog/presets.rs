//! Built-in presets.
//!
//! Photo papers and photo sizes are authored in centimetres, card sheets and
//! card sizes in millimetres, matching the tables they were collected from.
//! Decorative photo borders are always millimetres.

use super::config::{CatalogConfig, ItemEntry, OverrideEntry, PaperEntry};
use crate::units::Unit;

fn paper(id: &str, name: &str, unit: Unit, size: (f64, f64), margins: [f64; 4]) -> PaperEntry {
    let [left, right, top, bottom] = margins;
    PaperEntry {
        id: id.to_string(),
        name: Some(name.to_string()),
        unit,
        width: size.0,
        height: size.1,
        margin: None,
        margin_left: Some(left),
        margin_right: Some(right),
        margin_top: Some(top),
        margin_bottom: Some(bottom),
    }
}

fn photo(id: &str, name: &str, width_cm: f64, height_cm: f64, border_mm: f64) -> ItemEntry {
    ItemEntry {
        id: id.to_string(),
        name: Some(name.to_string()),
        unit: Unit::Cm,
        width: width_cm,
        height: height_cm,
        border_width: border_mm / 10.0,
        bleed: 0.0,
    }
}

fn card(id: &str, name: &str, width_mm: f64, height_mm: f64) -> ItemEntry {
    ItemEntry {
        id: id.to_string(),
        name: Some(name.to_string()),
        unit: Unit::Mm,
        width: width_mm,
        height: height_mm,
        border_width: 0.0,
        bleed: 0.0,
    }
}

/// The default catalog document.
pub fn builtin_config() -> CatalogConfig {
    let papers = vec![
        // Photo papers (cm)
        paper("3R", "3R (3.5 × 5 inch)", Unit::Cm, (12.7, 8.89), [0.5, 0.5, 0.5, 0.5]),
        paper("4R", "4R (6 × 4 inch)", Unit::Cm, (15.24, 10.16), [0.62, 0.62, 0.58, 0.58]),
        paper("5R", "5R (7 × 5 inch)", Unit::Cm, (17.78, 12.7), [0.7, 0.7, 0.6, 0.6]),
        paper("A4", "A4 (8.27 × 11.69 inch)", Unit::Cm, (21.0, 29.7), [1.0; 4]),
        paper("A5", "A5 (5.83 × 8.27 inch)", Unit::Cm, (14.8, 21.0), [0.8; 4]),
        paper("Letter", "Letter (8.5 × 11 inch)", Unit::Cm, (21.59, 27.94), [1.0; 4]),
        paper("Legal", "Legal (8.5 × 14 inch)", Unit::Cm, (21.59, 35.56), [1.0; 4]),
        // Borderless card sheets (mm)
        paper("4x6", "4 × 6 inch photo paper (portrait)", Unit::Mm, (101.6, 152.4), [0.0; 4]),
        paper("A4-sheet", "A4 card sheet", Unit::Mm, (210.0, 297.0), [0.0; 4]),
        paper("Letter-sheet", "Letter card sheet", Unit::Mm, (215.9, 279.4), [0.0; 4]),
    ];

    let items = vec![
        photo("3.5x4.5", "3.5 × 4.5 cm (India, EU, UK)", 3.5, 4.5, 3.0),
        photo("2x2", "2\" × 2\" (US, Canada)", 5.08, 5.08, 2.0),
        photo("33x48mm", "33 × 48 mm (China)", 3.3, 4.8, 2.0),
        photo("25x35mm", "25 × 35 mm (India PAN)", 2.5, 3.5, 2.0),
        photo("45x45mm", "45 × 45 mm (Vietnam)", 4.5, 4.5, 2.0),
        photo("35x50mm", "35 × 50 mm (France/Italy)", 3.5, 5.0, 2.0),
        photo("3.5x2.5cm", "3.5 × 2.5 cm - PAN Card (India)", 3.5, 2.5, 1.0),
        photo("1x1", "1\" × 1\" - Stamp Photo", 2.54, 2.54, 1.0),
        photo("1.2x1.6", "1.2\" × 1.6\" - Stamp Photo", 3.05, 4.06, 1.0),
        photo("35x45mm", "35 × 45 mm", 3.5, 4.5, 2.0),
        // ISO/IEC 7810 ID-1, also used for the "CR80" photo size
        card("CR80", "CR80 (Standard Credit Card)", 85.6, 53.98),
        card("CR79", "CR79 (Slightly Smaller)", 79.5, 50.0),
        card("business", "Business Card (US)", 89.0, 51.0),
        card("business-eu", "Business Card (EU)", 85.0, 55.0),
    ];

    let overrides = vec![OverrideEntry {
        paper: "4R".to_string(),
        item: "3.5x4.5".to_string(),
        rows: 2,
        columns: 4,
    }];

    CatalogConfig {
        papers,
        items,
        overrides,
    }
}
