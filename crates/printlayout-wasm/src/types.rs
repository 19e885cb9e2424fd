//! Request shapes accepted from JavaScript.
//!
//! These are passed as plain objects and parsed with `serde_wasm_bindgen`.
//! Every field has a default so callers only send what they change.

use printlayout_core::units::DEFAULT_DPI;
use printlayout_core::{Centering, CutMarks, GridRequest, Orientation, OutputFormat};
use serde::{Deserialize, Serialize};

/// Which sheet to lay out.
///
/// ```typescript
/// { paper: "4x6", item: "CR80", grid: { kind: "explicit", rows: 2, columns: 1 },
///   bleed: 3, centering: "centered-on-page", has_back: true }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsSheetRequest {
    /// Paper preset id
    pub paper: String,
    /// Item preset id
    pub item: String,
    pub grid: GridRequest,
    /// Rotate the paper before planning
    pub paper_orientation: Option<Orientation>,
    /// Rotate the item before planning
    pub item_orientation: Option<Orientation>,
    /// Bleed in mm, replacing the preset's own
    pub bleed: Option<f64>,
    pub centering: Centering,
    /// Whether a back design will be printed
    pub has_back: bool,
}

/// How to render a generated sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsRenderOptions {
    pub dpi: u32,
    pub format: OutputFormat,
    /// Preset name (`light-gray`) or `#RRGGBB`
    pub background: String,
    /// Rounded item corners, in mm. 0 keeps them square.
    pub corner_radius_mm: f64,
    pub cut_marks: CutMarks,
    pub margin_guides: bool,
}

impl Default for JsRenderOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            format: OutputFormat::default(),
            background: "white".to_string(),
            corner_radius_mm: 0.0,
            cut_marks: CutMarks::default(),
            margin_guides: false,
        }
    }
}

/// Argument to `generateSheet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsGenerateRequest {
    pub sheet: JsSheetRequest,
    pub render: JsRenderOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use printlayout_core::SpacingMode;

    #[test]
    fn test_sheet_request_defaults() {
        let req: JsSheetRequest = serde_json::from_str(r#"{ "paper": "A4", "item": "2x2" }"#).unwrap();
        assert_eq!(req.paper, "A4");
        assert_eq!(req.grid, GridRequest::auto_fit());
        assert_eq!(req.centering, Centering::GridOrigin);
        assert!(req.bleed.is_none());
        assert!(!req.has_back);
    }

    #[test]
    fn test_sheet_request_full() {
        let req: JsSheetRequest = serde_json::from_str(
            r#"{
                "paper": "4x6",
                "item": "CR80",
                "grid": { "kind": "explicit", "rows": 2, "columns": 1,
                          "spacing": { "mode": "fixed", "x": 0, "y": 5 } },
                "paper_orientation": "portrait",
                "item_orientation": "landscape",
                "bleed": 3,
                "centering": "centered-on-page",
                "has_back": true
            }"#,
        )
        .unwrap();
        assert_eq!(
            req.grid,
            GridRequest::Explicit {
                rows: 2,
                columns: 1,
                spacing: SpacingMode::Fixed { x: 0.0, y: 5.0 },
            }
        );
        assert_eq!(req.item_orientation, Some(Orientation::Landscape));
        assert_eq!(req.bleed, Some(3.0));
        assert_eq!(req.centering, Centering::CenteredOnPage);
        assert!(req.has_back);
    }

    #[test]
    fn test_render_options_defaults() {
        let opts: JsRenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.dpi, 300);
        assert_eq!(opts.format, OutputFormat::Png);
        assert_eq!(opts.background, "white");
        assert_eq!(opts.corner_radius_mm, 0.0);
        assert!(opts.cut_marks.enabled);
        assert!(!opts.margin_guides);
    }

    #[test]
    fn test_generate_request_nested() {
        let req: JsGenerateRequest = serde_json::from_str(
            r#"{
                "sheet": { "paper": "A4", "item": "35x45mm" },
                "render": { "format": { "format": "jpeg", "quality": 95 },
                            "cut_marks": { "enabled": false } }
            }"#,
        )
        .unwrap();
        assert_eq!(req.sheet.item, "35x45mm");
        assert_eq!(req.render.format, OutputFormat::Jpeg { quality: 95 });
        assert!(!req.render.cut_marks.enabled);
        assert_eq!(req.render.cut_marks.length_mm, 4.0);
    }
}
