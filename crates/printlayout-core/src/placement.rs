//! Turning a planned grid into positioned items.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the paper
//! - `x` grows to the right, `y` grows downwards
//! - All values are millimetres
//!
//! # Ordering
//!
//! Cells are visited row by row, left to right. This order numbers the items
//! `1..=N` for on-sheet labels and is the order of the returned list.

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemSpec, PaperSpec};
use crate::planner::LayoutResult;

/// Which physical side of an item a cell carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Front,
    Back,
}

impl Role {
    /// Upper-case label printed next to the item.
    pub fn label(self) -> &'static str {
        match self {
            Role::Front => "FRONT",
            Role::Back => "BACK",
        }
    }
}

/// Where the grid starts inside the margin box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Centering {
    /// Start at the top-left margin corner (card sheets).
    #[default]
    GridOrigin,
    /// Center the grid in the usable area (passport photo sheets).
    CenteredOnPage,
}

/// Assigns a [`Role`] to each grid cell.
///
/// Implementations must be pure functions of the cell coordinates so that
/// placement stays deterministic. Closures `Fn(row, column) -> Role` work
/// directly.
pub trait SideRule {
    fn role(&self, row: u32, column: u32) -> Role;
}

impl<F> SideRule for F
where
    F: Fn(u32, u32) -> Role,
{
    #[inline]
    fn role(&self, row: u32, column: u32) -> Role {
        self(row, column)
    }
}

/// Built-in side rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum SideSelection {
    /// Every cell is a front.
    FrontOnly,
    /// The last row holds backs, every other row fronts.
    RowSplit { last_row: u32 },
    /// Odd columns hold backs.
    ColumnAlternate,
}

impl SideSelection {
    /// Pick the rule for a sheet.
    ///
    /// Without a back item everything is a front. A two-row grid keeps
    /// fronts on top and backs underneath; any other shape alternates by
    /// column.
    pub fn for_layout(layout: &LayoutResult, has_back_item: bool) -> Self {
        if !has_back_item {
            SideSelection::FrontOnly
        } else if layout.rows == 2 {
            SideSelection::RowSplit { last_row: 1 }
        } else {
            SideSelection::ColumnAlternate
        }
    }
}

impl SideRule for SideSelection {
    fn role(&self, row: u32, column: u32) -> Role {
        match *self {
            SideSelection::FrontOnly => Role::Front,
            SideSelection::RowSplit { last_row } => {
                if row == last_row {
                    Role::Back
                } else {
                    Role::Front
                }
            }
            SideSelection::ColumnAlternate => {
                if column % 2 == 1 {
                    Role::Back
                } else {
                    Role::Front
                }
            }
        }
    }
}

/// One positioned item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub column: u32,
    /// 1-based position in row-major order.
    pub number: u32,
    /// Left edge, mm from the paper's left edge.
    pub x: f64,
    /// Top edge, mm from the paper's top edge.
    pub y: f64,
    /// Footprint width (including bleed), mm.
    pub width: f64,
    /// Footprint height (including bleed), mm.
    pub height: f64,
    pub role: Role,
}

impl Placement {
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Label such as `FRONT 3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.role.label(), self.number)
    }
}

/// Position every cell of `layout` on `paper`.
///
/// Returns `layout.rows * layout.columns` placements in row-major order,
/// or an empty list when either count is zero.
pub fn place<R>(
    paper: &PaperSpec,
    item: &ItemSpec,
    layout: &LayoutResult,
    side_rule: &R,
    centering: Centering,
) -> Vec<Placement>
where
    R: SideRule + ?Sized,
{
    if layout.rows == 0 || layout.columns == 0 {
        return Vec::new();
    }

    let width = item.footprint_width();
    let height = item.footprint_height();

    let (origin_x, origin_y) = match centering {
        Centering::GridOrigin => (paper.margin_left, paper.margin_top),
        Centering::CenteredOnPage => (
            paper.margin_left + (layout.usable_width - layout.grid_width(item)) / 2.0,
            paper.margin_top + (layout.usable_height - layout.grid_height(item)) / 2.0,
        ),
    };

    let step_x = width + layout.spacing_x;
    let step_y = height + layout.spacing_y;

    let mut placements = Vec::with_capacity(layout.total_items as usize);
    for row in 0..layout.rows {
        for column in 0..layout.columns {
            placements.push(Placement {
                row,
                column,
                number: row * layout.columns + column + 1,
                x: origin_x + column as f64 * step_x,
                y: origin_y + row as f64 * step_y,
                width,
                height,
                role: side_rule.role(row, column),
            });
        }
    }

    log::debug!(
        "placed {} x {} grid of {} on {} ({:?}), origin ({:.3}, {:.3})mm",
        layout.rows,
        layout.columns,
        item.id,
        paper.id,
        centering,
        origin_x,
        origin_y
    );

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{plan, GridRequest};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_single_column_alignment_modes() {
        let paper = PaperSpec::new("A4", 210.0, 297.0).with_uniform_margin(1.0);
        let item = ItemSpec::new("wide", 52.5, 40.0);
        let layout = plan(&paper, &item, &GridRequest::explicit(1, 1)).unwrap();

        let left = place(&paper, &item, &layout, &SideSelection::FrontOnly, Centering::GridOrigin);
        assert_eq!(left.len(), 1);
        assert!((left[0].x - 1.0).abs() < EPS);
        assert!((left[0].y - 1.0).abs() < EPS);

        let centered = place(
            &paper,
            &item,
            &layout,
            &SideSelection::FrontOnly,
            Centering::CenteredOnPage,
        );
        assert!((centered[0].x - 78.75).abs() < EPS);
        assert!((centered[0].y - (1.0 + (295.0 - 40.0) / 2.0)).abs() < EPS);
    }

    #[test]
    fn test_row_split_roles() {
        let paper = PaperSpec::new("A4-sheet", 210.0, 297.0);
        let item = ItemSpec::new("small", 30.0, 30.0);
        let layout = plan(&paper, &item, &GridRequest::explicit(2, 3)).unwrap();

        let rule = SideSelection::for_layout(&layout, true);
        assert_eq!(rule, SideSelection::RowSplit { last_row: 1 });

        let placements = place(&paper, &item, &layout, &rule, Centering::GridOrigin);
        let roles: Vec<_> = placements.iter().map(|p| (p.row, p.column, p.role)).collect();
        assert_eq!(
            roles,
            vec![
                (0, 0, Role::Front),
                (0, 1, Role::Front),
                (0, 2, Role::Front),
                (1, 0, Role::Back),
                (1, 1, Role::Back),
                (1, 2, Role::Back),
            ]
        );
    }

    #[test]
    fn test_column_alternate_roles() {
        let rule = SideSelection::ColumnAlternate;
        assert_eq!(rule.role(0, 0), Role::Front);
        assert_eq!(rule.role(0, 1), Role::Back);
        assert_eq!(rule.role(3, 2), Role::Front);
        assert_eq!(rule.role(3, 5), Role::Back);
    }

    #[test]
    fn test_rule_selection() {
        let layout = LayoutResult {
            rows: 3,
            columns: 2,
            total_items: 6,
            usable_width: 100.0,
            usable_height: 100.0,
            spacing_x: 0.0,
            spacing_y: 0.0,
        };
        assert_eq!(SideSelection::for_layout(&layout, false), SideSelection::FrontOnly);
        assert_eq!(
            SideSelection::for_layout(&layout, true),
            SideSelection::ColumnAlternate
        );
    }

    #[test]
    fn test_front_only_without_back_item() {
        let paper = PaperSpec::new("4x6", 101.6, 152.4);
        let item = ItemSpec::new("CR80", 85.6, 53.98);
        let layout = plan(&paper, &item, &GridRequest::explicit(2, 1)).unwrap();
        let rule = SideSelection::for_layout(&layout, false);
        let placements = place(&paper, &item, &layout, &rule, Centering::GridOrigin);
        assert!(placements.iter().all(|p| p.role == Role::Front));
    }

    #[test]
    fn test_closure_side_rule() {
        let paper = PaperSpec::new("A4-sheet", 210.0, 297.0);
        let item = ItemSpec::new("small", 30.0, 30.0);
        let layout = plan(&paper, &item, &GridRequest::explicit(3, 3)).unwrap();

        let diagonal = |row: u32, column: u32| if row == column { Role::Back } else { Role::Front };
        let placements = place(&paper, &item, &layout, &diagonal, Centering::GridOrigin);
        let backs: Vec<_> = placements
            .iter()
            .filter(|p| p.role == Role::Back)
            .map(|p| p.number)
            .collect();
        assert_eq!(backs, vec![1, 5, 9]);
    }

    #[test]
    fn test_row_major_numbering() {
        let paper = PaperSpec::new("A4", 210.0, 297.0).with_uniform_margin(10.0);
        let item = ItemSpec::new("35x45mm", 35.0, 45.0);
        let layout = plan(&paper, &item, &GridRequest::auto_fit()).unwrap();
        let placements = place(&paper, &item, &layout, &SideSelection::FrontOnly, Centering::GridOrigin);

        assert_eq!(placements.len(), 30);
        for (i, p) in placements.iter().enumerate() {
            assert_eq!(p.number as usize, i + 1);
            assert_eq!(p.row as usize, i / 5);
            assert_eq!(p.column as usize, i % 5);
        }
        let last = placements.last().unwrap();
        assert!((last.right() - 200.0).abs() < EPS);
        assert!((last.bottom() - 287.0).abs() < EPS);
        assert_eq!(last.label(), "FRONT 30");
    }

    #[test]
    fn test_bleed_inflates_placement_size() {
        let paper = PaperSpec::new("4x6", 101.6, 152.4);
        let card = ItemSpec::new("CR80", 85.6, 53.98).with_bleed(3.0);
        let layout = plan(&paper, &card, &GridRequest::explicit_with_spacing(2, 1, 5.0)).unwrap();
        let placements = place(
            &paper,
            &card,
            &layout,
            &SideSelection::FrontOnly,
            Centering::CenteredOnPage,
        );

        assert!((placements[0].width - 91.6).abs() < EPS);
        assert!((placements[0].height - 59.98).abs() < EPS);
        // Fixed spacing: remainder split evenly above and below
        let grid_height = 2.0 * 59.98 + 5.0;
        assert!((placements[0].y - (152.4 - grid_height) / 2.0).abs() < EPS);
        assert!((placements[1].y - placements[0].y - 64.98).abs() < EPS);
        assert!((placements[0].x - (101.6 - 91.6) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_empty_layout_yields_no_placements() {
        let paper = PaperSpec::new("A4", 210.0, 297.0).with_uniform_margin(10.0);
        let item = ItemSpec::new("poster", 500.0, 700.0);
        let layout = plan(&paper, &item, &GridRequest::auto_fit()).unwrap();
        let placements = place(&paper, &item, &layout, &SideSelection::FrontOnly, Centering::CenteredOnPage);
        assert!(placements.is_empty());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Back).unwrap(), "\"back\"");
        let centering: Centering = serde_json::from_str("\"centered-on-page\"").unwrap();
        assert_eq!(centering, Centering::CenteredOnPage);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
