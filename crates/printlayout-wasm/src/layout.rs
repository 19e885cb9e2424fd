//! The `PrintLayout` class exposed to JavaScript.
//!
//! Wraps a [`SizeCatalog`] and turns JS request objects into plans,
//! placements, specifications and finished sheet images.
//!
//! ```typescript
//! import init, { PrintLayout } from '@printlayout/wasm';
//!
//! await init();
//! const layout = new PrintLayout();
//! const request = { paper: "A4", item: "35x45mm" };
//! const plan = layout.plan(request);
//! const cells = layout.place(request, plan);
//! const png = layout.generateSheet({ sheet: request }, frontBytes, undefined);
//! ```

use printlayout_core::{
    check_layout, compose_sheet, decode_artwork, encode_sheet, parse_color, place, plan, ComposeError,
    ComposeOptions, GridRequest, ItemSpec, LayoutError, LayoutResult, PaperSpec, Placement,
    PrintSpecifications, SheetArtwork, SideSelection, SizeCatalog,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{JsGenerateRequest, JsSheetRequest};

/// Paper and item specs after orientation and bleed have been applied.
#[derive(Debug, Clone)]
struct ResolvedSheet {
    paper: PaperSpec,
    item: ItemSpec,
    grid: GridRequest,
}

/// Print layout engine bound to a size catalog.
#[wasm_bindgen]
pub struct PrintLayout {
    catalog: SizeCatalog,
}

impl Default for PrintLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PrintLayout {
    /// Engine over the built-in presets.
    #[wasm_bindgen(constructor)]
    pub fn new() -> PrintLayout {
        PrintLayout {
            catalog: SizeCatalog::builtin(),
        }
    }

    /// Engine over a JSON catalog (see `CatalogConfig`).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<PrintLayout, JsValue> {
        SizeCatalog::from_json(json)
            .map(|catalog| PrintLayout { catalog })
            .map_err(to_js_error)
    }

    /// Plan a grid. Returns a `LayoutResult` object.
    pub fn plan(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: JsSheetRequest = from_js(request, "sheet request")?;
        let layout = self.plan_sheet(&request).map_err(to_js_error)?;
        to_js(&layout)
    }

    /// Position every cell of a layout returned by `plan`.
    pub fn place(&self, request: JsValue, layout: JsValue) -> Result<JsValue, JsValue> {
        let request: JsSheetRequest = from_js(request, "sheet request")?;
        let layout: LayoutResult = from_js(layout, "layout")?;
        let cells = self.place_sheet(&request, &layout).map_err(to_js_error)?;
        to_js(&cells)
    }

    /// Physical and pixel dimensions of the planned sheet at `dpi`.
    pub fn specifications(&self, request: JsValue, dpi: u32) -> Result<JsValue, JsValue> {
        let request: JsSheetRequest = from_js(request, "sheet request")?;
        let specs = self
            .sheet_specifications(&request, dpi)
            .map_err(to_js_error)?;
        to_js(&specs)
    }

    /// Plan, place and render a sheet. Returns the encoded image bytes.
    ///
    /// `front` and `back` are encoded images (PNG, JPEG). Back cells reuse
    /// the front when `back` is omitted.
    #[wasm_bindgen(js_name = generateSheet)]
    pub fn generate_sheet(
        &self,
        request: JsValue,
        front: &[u8],
        back: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, JsValue> {
        let request: JsGenerateRequest = from_js(request, "generate request")?;
        self.render_sheet(&request, front, back.as_deref())
            .map_err(to_js_error)
    }

    /// All paper presets, sizes in mm.
    #[wasm_bindgen(js_name = paperSizes)]
    pub fn paper_sizes(&self) -> Result<JsValue, JsValue> {
        to_js(self.catalog.papers())
    }

    /// All item presets, sizes in mm.
    #[wasm_bindgen(js_name = itemSizes)]
    pub fn item_sizes(&self) -> Result<JsValue, JsValue> {
        to_js(self.catalog.items())
    }
}

impl PrintLayout {
    fn resolve(&self, request: &JsSheetRequest) -> Result<ResolvedSheet, LayoutError> {
        let preset_paper = self.catalog.paper_spec(&request.paper)?;
        let preset_item = self.catalog.item_spec(&request.item)?;

        let paper = match request.paper_orientation {
            Some(o) => preset_paper.oriented(o),
            None => preset_paper.clone(),
        };
        let mut item = match request.item_orientation {
            Some(o) => preset_item.oriented(o),
            None => preset_item.clone(),
        };
        if let Some(bleed) = request.bleed {
            item = item.with_bleed(bleed);
        }

        // Pairing overrides describe the presets as authored; skip them once
        // either side has been rotated.
        let rotated = paper.width != preset_paper.width || item.width != preset_item.width;
        let grid = match request.grid {
            GridRequest::AutoFit(mut auto) if auto.preset.is_none() && !rotated => {
                auto.preset = self.catalog.pairing_override(&request.paper, &request.item);
                GridRequest::AutoFit(auto)
            }
            other => other,
        };

        Ok(ResolvedSheet { paper, item, grid })
    }

    pub(crate) fn plan_sheet(&self, request: &JsSheetRequest) -> Result<LayoutResult, LayoutError> {
        let sheet = self.resolve(request)?;
        plan(&sheet.paper, &sheet.item, &sheet.grid)
    }

    pub(crate) fn place_sheet(
        &self,
        request: &JsSheetRequest,
        layout: &LayoutResult,
    ) -> Result<Vec<Placement>, LayoutError> {
        let sheet = self.resolve(request)?;
        check_layout(&sheet.paper, &sheet.item, layout)?;
        let rule = SideSelection::for_layout(layout, request.has_back);
        Ok(place(
            &sheet.paper,
            &sheet.item,
            layout,
            &rule,
            request.centering,
        ))
    }

    pub(crate) fn sheet_specifications(
        &self,
        request: &JsSheetRequest,
        dpi: u32,
    ) -> Result<PrintSpecifications, LayoutError> {
        let sheet = self.resolve(request)?;
        let layout = plan(&sheet.paper, &sheet.item, &sheet.grid)?;
        Ok(PrintSpecifications::new(
            &sheet.paper,
            &sheet.item,
            &layout,
            dpi,
        ))
    }

    pub(crate) fn render_sheet(
        &self,
        request: &JsGenerateRequest,
        front: &[u8],
        back: Option<&[u8]>,
    ) -> Result<Vec<u8>, ComposeError> {
        let render = &request.render;
        let item_background = parse_color(&render.background)?;

        let artwork = SheetArtwork {
            front: decode_artwork(front)?,
            back: back.map(decode_artwork).transpose()?,
        };

        let mut sheet_request = request.sheet.clone();
        sheet_request.has_back |= artwork.back.is_some();

        let sheet = self.resolve(&sheet_request)?;
        let layout = plan(&sheet.paper, &sheet.item, &sheet.grid)?;
        let cells = self.place_sheet(&sheet_request, &layout)?;

        let options = ComposeOptions {
            dpi: render.dpi,
            item_background,
            bleed: sheet.item.bleed,
            border_width: sheet.item.border_width,
            corner_radius_mm: render.corner_radius_mm,
            cut_marks: render.cut_marks,
            margin_guides: render.margin_guides,
        };
        let image = compose_sheet(&sheet.paper, &cells, &artwork, &options)?;
        Ok(encode_sheet(&image, render.format)?)
    }
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}


/// WASM-specific tests that go through `JsValue`.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_request(paper: &str, item: &str) -> JsValue {
        serde_wasm_bindgen::to_value(&JsSheetRequest {
            paper: paper.to_string(),
            item: item.to_string(),
            ..JsSheetRequest::default()
        })
        .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_plan_and_place_roundtrip() {
        let layout = PrintLayout::new();
        let plan = layout.plan(js_request("A4", "35x45mm")).unwrap();
        let cells = layout.place(js_request("A4", "35x45mm"), plan).unwrap();
        let cells: Vec<Placement> = serde_wasm_bindgen::from_value(cells).unwrap();
        assert_eq!(cells.len(), 30);
    }

    #[wasm_bindgen_test]
    fn test_unknown_preset_is_error() {
        let layout = PrintLayout::new();
        assert!(layout.plan(js_request("nope", "35x45mm")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_bad_request_shape() {
        let layout = PrintLayout::new();
        assert!(layout.plan(JsValue::from_str("A4")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_preset_lists() {
        let layout = PrintLayout::new();
        let papers: Vec<PaperSpec> =
            serde_wasm_bindgen::from_value(layout.paper_sizes().unwrap()).unwrap();
        assert!(papers.iter().any(|p| p.id == "A4"));
        let items: Vec<ItemSpec> =
            serde_wasm_bindgen::from_value(layout.item_sizes().unwrap()).unwrap();
        assert!(items.iter().any(|i| i.id == "CR80"));
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_garbage() {
        assert!(PrintLayout::from_json("{").is_err());
    }
}
