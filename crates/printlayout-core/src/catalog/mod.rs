//! Named paper and item presets.
//!
//! A [`SizeCatalog`] is built once (from the built-in tables or a JSON
//! document) and is read-only afterwards, so it can be shared freely between
//! threads. Entries are normalised to millimetres when they are registered.
//!
//! The catalog also carries the id-level entry points used by the HTTP and
//! WASM layers: [`SizeCatalog::plan`] and [`SizeCatalog::place`].

mod config;
mod presets;
mod types;

use std::collections::HashMap;

pub use config::{CatalogConfig, ItemEntry, OverrideEntry, PaperEntry};
pub use presets::builtin_config;
pub use types::{GridCounts, ItemSpec, Orientation, PaperSpec};

use crate::error::{LayoutError, PresetKind};
use crate::placement::{place, Centering, Placement, SideSelection};
use crate::planner::{check_layout, plan, GridRequest, LayoutResult};

/// Immutable lookup of paper and item presets.
#[derive(Debug, Clone, Default)]
pub struct SizeCatalog {
    papers: Vec<PaperSpec>,
    items: Vec<ItemSpec>,
    paper_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    overrides: HashMap<(String, String), GridCounts>,
}

impl SizeCatalog {
    /// Catalog with the built-in photo, card and sheet presets.
    pub fn builtin() -> Self {
        // Covered by tests: an error here means the preset tables are wrong.
        match Self::from_config(builtin_config()) {
            Ok(catalog) => catalog,
            Err(e) => panic!("built-in catalog is invalid: {e}"),
        }
    }

    /// Build a catalog from a configuration document.
    ///
    /// Each paper and item is validated; duplicate ids and overrides that
    /// name unregistered presets are rejected.
    pub fn from_config(config: CatalogConfig) -> Result<Self, LayoutError> {
        let mut catalog = Self::default();

        for entry in &config.papers {
            catalog.register_paper(entry.to_spec())?;
        }
        for entry in &config.items {
            catalog.register_item(entry.to_spec())?;
        }
        for entry in &config.overrides {
            // Fail early on typos rather than silently never matching
            catalog.paper_spec(&entry.paper)?;
            catalog.item_spec(&entry.item)?;
            catalog
                .overrides
                .insert((entry.paper.clone(), entry.item.clone()), entry.counts());
        }

        log::debug!(
            "catalog ready: {} papers, {} items, {} overrides",
            catalog.papers.len(),
            catalog.items.len(),
            catalog.overrides.len()
        );

        Ok(catalog)
    }

    /// Parse a JSON [`CatalogConfig`] and build a catalog from it.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: CatalogConfig =
            serde_json::from_str(json).map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        Self::from_config(config)
    }

    fn register_paper(&mut self, spec: PaperSpec) -> Result<(), LayoutError> {
        spec.validate()?;
        if self.paper_index.contains_key(&spec.id) {
            return Err(LayoutError::DuplicatePreset {
                kind: PresetKind::Paper,
                id: spec.id,
            });
        }
        self.paper_index.insert(spec.id.clone(), self.papers.len());
        self.papers.push(spec);
        Ok(())
    }

    fn register_item(&mut self, spec: ItemSpec) -> Result<(), LayoutError> {
        spec.validate()?;
        if self.item_index.contains_key(&spec.id) {
            return Err(LayoutError::DuplicatePreset {
                kind: PresetKind::Item,
                id: spec.id,
            });
        }
        self.item_index.insert(spec.id.clone(), self.items.len());
        self.items.push(spec);
        Ok(())
    }

    /// Look up a paper preset.
    pub fn paper_spec(&self, id: &str) -> Result<PaperSpec, LayoutError> {
        self.paper_index
            .get(id)
            .map(|&i| self.papers[i].clone())
            .ok_or_else(|| LayoutError::UnknownPreset {
                kind: PresetKind::Paper,
                id: id.to_string(),
            })
    }

    /// Look up an item preset.
    pub fn item_spec(&self, id: &str) -> Result<ItemSpec, LayoutError> {
        self.item_index
            .get(id)
            .map(|&i| self.items[i].clone())
            .ok_or_else(|| LayoutError::UnknownPreset {
                kind: PresetKind::Item,
                id: id.to_string(),
            })
    }

    /// Paper presets in registration order.
    pub fn papers(&self) -> &[PaperSpec] {
        &self.papers
    }

    /// Item presets in registration order.
    pub fn items(&self) -> &[ItemSpec] {
        &self.items
    }

    /// Hard-coded grid for a paper/item pairing, if any.
    pub fn pairing_override(&self, paper_id: &str, item_id: &str) -> Option<GridCounts> {
        self.overrides
            .get(&(paper_id.to_string(), item_id.to_string()))
            .copied()
    }

    /// Plan a grid by preset id.
    ///
    /// Auto-fit requests without their own preset pick up the pairing
    /// override registered for `(paper_id, item_id)`.
    pub fn plan(
        &self,
        paper_id: &str,
        item_id: &str,
        request: &GridRequest,
    ) -> Result<LayoutResult, LayoutError> {
        let paper = self.paper_spec(paper_id)?;
        let item = self.item_spec(item_id)?;

        let request = match *request {
            GridRequest::AutoFit(mut auto) if auto.preset.is_none() => {
                auto.preset = self.pairing_override(paper_id, item_id);
                GridRequest::AutoFit(auto)
            }
            other => other,
        };

        plan(&paper, &item, &request)
    }

    /// Place a planned grid by preset id, choosing the built-in side rule
    /// from the grid shape and whether a back item exists.
    ///
    /// `layout` is checked against the presets first, so a grid that was
    /// edited or planned for another sheet fails instead of spilling off
    /// the paper.
    pub fn place(
        &self,
        paper_id: &str,
        item_id: &str,
        layout: &LayoutResult,
        has_back_item: bool,
        centering: Centering,
    ) -> Result<Vec<Placement>, LayoutError> {
        let paper = self.paper_spec(paper_id)?;
        let item = self.item_spec(item_id)?;
        check_layout(&paper, &item, layout)?;
        let rule = SideSelection::for_layout(layout, has_back_item);
        Ok(place(&paper, &item, layout, &rule, centering))
    }
}
