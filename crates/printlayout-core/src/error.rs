//! Error types for layout planning and catalog lookups.

use thiserror::Error;

/// Which preset table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Paper,
    Item,
}

impl std::fmt::Display for PresetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetKind::Paper => f.write_str("paper"),
            PresetKind::Item => f.write_str("item"),
        }
    }
}

/// Errors raised by the catalog, the planner and the id-level contract.
///
/// All variants are local validation failures. None of them are transient,
/// so callers should surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The requested paper or item id is not registered.
    #[error("Unknown {kind} preset: {id}")]
    UnknownPreset { kind: PresetKind, id: String },

    /// A catalog configuration registers the same id twice.
    #[error("Duplicate {kind} preset: {id}")]
    DuplicatePreset { kind: PresetKind, id: String },

    /// The catalog configuration document could not be parsed.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Margins consume the whole sheet, or a dimension is not positive.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An explicit grid request does not fit the usable area.
    #[error(
        "{rows} x {columns} items need {required_width:.2} x {required_height:.2} mm \
         but only {usable_width:.2} x {usable_height:.2} mm is usable"
    )]
    ItemsDoNotFit {
        rows: u32,
        columns: u32,
        required_width: f64,
        required_height: f64,
        usable_width: f64,
        usable_height: f64,
    },

    /// An explicit grid request is malformed (zero counts, negative spacing).
    #[error("Invalid grid request: {0}")]
    InvalidGrid(String),
}
