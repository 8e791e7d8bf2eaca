//! Grid layout: sequential day index → (column, row) → world position.
//!
//! Columns run across the 7 days of a week, rows across weeks. The grid lies
//! on the horizontal plane centred on the origin; `y` is the bar's base.

use glam::Vec3;

use super::calendar::{CalendarDataset, DAYS_IN_WEEK};

/// Distance between neighbouring bar centres.
pub const SPACING: f32 = 1.1;
/// Footprint of a bar; smaller than [`SPACING`] so neighbours never touch.
pub const BAR_WIDTH: f32 = 0.8;
/// Week count used for sizing before any dataset exists.
pub const DEFAULT_WEEK_COUNT: usize = 52;

const COLUMN_OFFSET: f32 = (DAYS_IN_WEEK as f32 - 1.0) / 2.0;

/// World-space point or direction. `y` is up.
pub type Position3 = Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
    pub position: Position3,
}

/// Place the `index`-th day of a dataset spanning `week_count` weeks.
pub fn layout_cell(index: usize, week_count: usize) -> GridCell {
    let column = index % DAYS_IN_WEEK;
    let row = index / DAYS_IN_WEEK;
    let row_offset = (week_count.max(1) as f32 - 1.0) / 2.0;

    GridCell {
        column,
        row,
        position: Position3::new(
            (column as f32 - COLUMN_OFFSET) * SPACING,
            0.0,
            (row as f32 - row_offset) * SPACING,
        ),
    }
}

/// Week count for sizing. The default only applies while no dataset is loaded.
pub fn resolve_week_count(dataset: Option<&CalendarDataset>) -> usize {
    match dataset {
        Some(dataset) => dataset.week_count,
        None => DEFAULT_WEEK_COUNT,
    }
}
