//! Printlayout Core - print sheet geometry
//!
//! This crate plans how many photos or cards fit on a sheet of paper, where
//! each one goes, and renders the result to a print-ready raster.
//!
//! - `catalog` - named paper and item presets, JSON configuration
//! - `planner` - grid fitting and spacing
//! - `placement` - per-cell rectangles and front/back roles
//! - `specs` - physical and pixel dimensions of a sheet
//! - `compose` - painting artwork, cut marks and guides onto a sheet
//! - `encode` - PNG/JPEG output
//!
//! All lengths are millimetres.

pub mod catalog;
pub mod compose;
pub mod encode;
pub mod error;
pub mod placement;
pub mod planner;
pub mod specs;
pub mod units;

pub use catalog::{GridCounts, ItemSpec, Orientation, PaperSpec, SizeCatalog};
pub use compose::{
    compose_sheet, decode_artwork, parse_color, BackgroundColor, ComposeError, ComposeOptions,
    CutMarks, SheetArtwork, MAX_SHEET_PIXELS,
};
pub use encode::{encode_sheet, EncodeError, OutputFormat};
pub use error::{LayoutError, PresetKind};
pub use placement::{place, Centering, Placement, Role, SideRule, SideSelection};
pub use planner::{check_layout, plan, AutoFit, FitStrategy, GridRequest, LayoutResult, SpacingMode};
pub use specs::PrintSpecifications;
pub use units::Unit;
