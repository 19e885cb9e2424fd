//! Grid planning: how many items fit on a sheet and how they are spaced.
//!
//! # Modes
//!
//! - **Auto-fit** derives the row and column counts from the usable area.
//!   The default [`FitStrategy::Greedy`] fits as many items as possible
//!   without reserving any gap, then spreads whatever is left over evenly
//!   between them. Spacing is a distribution of unused space, never a
//!   reservation that could lower the count. [`FitStrategy::ReserveSpacing`]
//!   is the alternative that keeps at least the requested gap between items.
//! - **Explicit** takes the counts from the caller and fails with
//!   [`LayoutError::ItemsDoNotFit`] when they overflow the usable area.
//!
//! # Spacing
//!
//! Derived spacing uses all of the leftover space as inter-item gaps:
//! `(usable - n * size) / (n - 1)` for `n > 1`. A single row or column gets a
//! spacing of zero and sits against the margin; centering it is the
//! renderer's job (see [`Centering`](crate::placement::Centering)).
//!
//! All arithmetic is `f64` in millimetres. Counts are truncated with `floor`
//! after adding [`GEOMETRY_EPSILON`] to the usable length, so sizes converted
//! from centimetres or inches that land a hair below an exact multiple still
//! count.

use serde::{Deserialize, Serialize};

use crate::catalog::{GridCounts, ItemSpec, PaperSpec};
use crate::error::LayoutError;

/// Absolute tolerance (mm) for fit comparisons.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// How auto-fit derives its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitStrategy {
    /// Fit as many items as the usable area holds, ignoring spacing.
    #[default]
    Greedy,
    /// Reserve the requested spacing between items before fitting.
    ReserveSpacing,
}

/// How an explicit grid is spaced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SpacingMode {
    /// Spread the leftover space evenly between items.
    #[default]
    Distribute,
    /// Use exactly this gap between items.
    Fixed { x: f64, y: f64 },
}

impl SpacingMode {
    /// The same fixed gap on both axes.
    pub fn uniform(spacing: f64) -> Self {
        SpacingMode::Fixed {
            x: spacing,
            y: spacing,
        }
    }
}

/// Parameters of an auto-fit request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoFit {
    #[serde(default)]
    pub strategy: FitStrategy,
    /// Desired gap between items in mm. Only reserved by
    /// [`FitStrategy::ReserveSpacing`].
    #[serde(default)]
    pub spacing: f64,
    /// Counts to use instead of the computed ones. Still clamped to the
    /// usable area.
    #[serde(default)]
    pub preset: Option<GridCounts>,
}

/// What the caller wants laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GridRequest {
    AutoFit(AutoFit),
    Explicit {
        rows: u32,
        columns: u32,
        #[serde(default)]
        spacing: SpacingMode,
    },
}

impl Default for GridRequest {
    fn default() -> Self {
        GridRequest::AutoFit(AutoFit::default())
    }
}

impl GridRequest {
    /// Greedy auto-fit.
    pub fn auto_fit() -> Self {
        Self::default()
    }

    /// Auto-fit that keeps at least `spacing` mm between items.
    pub fn auto_fit_reserving(spacing: f64) -> Self {
        GridRequest::AutoFit(AutoFit {
            strategy: FitStrategy::ReserveSpacing,
            spacing,
            preset: None,
        })
    }

    /// Explicit counts with evenly distributed spacing.
    pub fn explicit(rows: u32, columns: u32) -> Self {
        GridRequest::Explicit {
            rows,
            columns,
            spacing: SpacingMode::Distribute,
        }
    }

    /// Explicit counts with a fixed gap.
    pub fn explicit_with_spacing(rows: u32, columns: u32, spacing: f64) -> Self {
        GridRequest::Explicit {
            rows,
            columns,
            spacing: SpacingMode::uniform(spacing),
        }
    }
}

/// A planned grid. Recomputed per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub rows: u32,
    pub columns: u32,
    /// `rows * columns`
    pub total_items: u32,
    /// Paper width minus left and right margins, in mm.
    pub usable_width: f64,
    /// Paper height minus top and bottom margins, in mm.
    pub usable_height: f64,
    /// Gap between adjacent columns, in mm.
    pub spacing_x: f64,
    /// Gap between adjacent rows, in mm.
    pub spacing_y: f64,
}

impl LayoutResult {
    /// True when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Horizontal extent of the grid: item footprints plus inner gaps.
    pub fn grid_width(&self, item: &ItemSpec) -> f64 {
        extent(self.columns, item.footprint_width(), self.spacing_x)
    }

    /// Vertical extent of the grid: item footprints plus inner gaps.
    pub fn grid_height(&self, item: &ItemSpec) -> f64 {
        extent(self.rows, item.footprint_height(), self.spacing_y)
    }
}

fn extent(count: u32, size: f64, gap: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        count as f64 * size + (count - 1) as f64 * gap
    }
}

/// Number of back-to-back `size` slots that fit in `usable`.
fn fit_count(usable: f64, size: f64) -> u32 {
    let n = ((usable + GEOMETRY_EPSILON) / size).floor();
    if n.is_finite() && n > 0.0 {
        n as u32
    } else {
        0
    }
}

fn fits(count: u32, size: f64, gap: f64, usable: f64) -> bool {
    extent(count, size, gap) <= usable + GEOMETRY_EPSILON
}

fn distributed_spacing(count: u32, size: f64, usable: f64) -> f64 {
    if count > 1 {
        ((usable - count as f64 * size) / (count - 1) as f64).max(0.0)
    } else {
        0.0
    }
}

fn check_spacing(value: f64, what: &str) -> Result<(), LayoutError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::InvalidGrid(format!(
            "{what} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Check that `layout` is a grid of `item` that fits on `paper`.
///
/// Layouts that come back from a client are untrusted and go through this
/// before placement. Anything [`plan`] returned for the same paper and item
/// passes.
pub fn check_layout(
    paper: &PaperSpec,
    item: &ItemSpec,
    layout: &LayoutResult,
) -> Result<(), LayoutError> {
    paper.validate()?;
    item.validate()?;
    check_spacing(layout.spacing_x, "horizontal spacing")?;
    check_spacing(layout.spacing_y, "vertical spacing")?;

    let LayoutResult { rows, columns, .. } = *layout;
    if rows.checked_mul(columns) != Some(layout.total_items) {
        return Err(LayoutError::InvalidGrid(format!(
            "total_items {} does not match {rows} x {columns}",
            layout.total_items
        )));
    }

    let usable_width = paper.usable_width();
    let usable_height = paper.usable_height();
    // Written so that NaN fails too.
    let same = |a: f64, b: f64| (a - b).abs() <= GEOMETRY_EPSILON;
    if !same(layout.usable_width, usable_width) || !same(layout.usable_height, usable_height) {
        return Err(LayoutError::InvalidGrid(format!(
            "layout was planned for a {} x {} mm usable area, {} has {} x {} mm",
            layout.usable_width, layout.usable_height, paper.id, usable_width, usable_height
        )));
    }

    let (w, h) = (item.footprint_width(), item.footprint_height());
    if !fits(columns, w, layout.spacing_x, usable_width)
        || !fits(rows, h, layout.spacing_y, usable_height)
    {
        return Err(LayoutError::ItemsDoNotFit {
            rows,
            columns,
            required_width: extent(columns, w, layout.spacing_x),
            required_height: extent(rows, h, layout.spacing_y),
            usable_width,
            usable_height,
        });
    }

    Ok(())
}

/// Plan a grid of `item` on `paper`.
///
/// Fails with [`LayoutError::InvalidGeometry`] when the paper has no usable
/// area or the item is degenerate, with [`LayoutError::ItemsDoNotFit`] when an
/// explicit request overflows, and with [`LayoutError::InvalidGrid`] for zero
/// counts or negative spacing. There is no partial result.
pub fn plan(
    paper: &PaperSpec,
    item: &ItemSpec,
    request: &GridRequest,
) -> Result<LayoutResult, LayoutError> {
    paper.validate()?;
    item.validate()?;

    let usable_width = paper.usable_width();
    let usable_height = paper.usable_height();
    let w = item.footprint_width();
    let h = item.footprint_height();

    let (rows, columns, spacing_x, spacing_y) = match *request {
        GridRequest::AutoFit(auto) => {
            check_spacing(auto.spacing, "auto-fit spacing")?;

            let (mut rows, mut columns) = match auto.strategy {
                FitStrategy::Greedy => (fit_count(usable_height, h), fit_count(usable_width, w)),
                FitStrategy::ReserveSpacing => (
                    fit_count(usable_height + auto.spacing, h + auto.spacing),
                    fit_count(usable_width + auto.spacing, w + auto.spacing),
                ),
            };

            if let Some(preset) = auto.preset {
                rows = preset.rows;
                columns = preset.columns;
            }

            // A preset (or any future heuristic) may ask for more than fits
            if !fits(columns, w, 0.0, usable_width) {
                log::debug!(
                    "clamping {} columns of {}mm to usable width {}mm",
                    columns,
                    w,
                    usable_width
                );
                columns = fit_count(usable_width, w);
            }
            if !fits(rows, h, 0.0, usable_height) {
                log::debug!(
                    "clamping {} rows of {}mm to usable height {}mm",
                    rows,
                    h,
                    usable_height
                );
                rows = fit_count(usable_height, h);
            }

            (
                rows,
                columns,
                distributed_spacing(columns, w, usable_width),
                distributed_spacing(rows, h, usable_height),
            )
        }
        GridRequest::Explicit {
            rows,
            columns,
            spacing,
        } => {
            if rows == 0 || columns == 0 {
                return Err(LayoutError::InvalidGrid(format!(
                    "rows and columns must be at least 1, got {rows} x {columns}"
                )));
            }

            let (gap_x, gap_y) = match spacing {
                SpacingMode::Distribute => (0.0, 0.0),
                SpacingMode::Fixed { x, y } => {
                    check_spacing(x, "horizontal spacing")?;
                    check_spacing(y, "vertical spacing")?;
                    (x, y)
                }
            };

            if !fits(columns, w, gap_x, usable_width) || !fits(rows, h, gap_y, usable_height) {
                return Err(LayoutError::ItemsDoNotFit {
                    rows,
                    columns,
                    required_width: extent(columns, w, gap_x),
                    required_height: extent(rows, h, gap_y),
                    usable_width,
                    usable_height,
                });
            }

            match spacing {
                SpacingMode::Distribute => (
                    rows,
                    columns,
                    distributed_spacing(columns, w, usable_width),
                    distributed_spacing(rows, h, usable_height),
                ),
                SpacingMode::Fixed { .. } => (
                    rows,
                    columns,
                    if columns > 1 { gap_x } else { 0.0 },
                    if rows > 1 { gap_y } else { 0.0 },
                ),
            }
        }
    };

    let layout = LayoutResult {
        rows,
        columns,
        total_items: rows.saturating_mul(columns),
        usable_width,
        usable_height,
        spacing_x,
        spacing_y,
    };

    log::debug!(
        "planned {} on {}: {} x {} = {} items, spacing {:.3} x {:.3}mm",
        item.id,
        paper.id,
        layout.rows,
        layout.columns,
        layout.total_items,
        layout.spacing_x,
        layout.spacing_y
    );

    Ok(layout)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
