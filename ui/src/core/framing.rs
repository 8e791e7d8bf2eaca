//! Camera framing derived from the number of weeks in the grid.
//!
//! More weeks means a deeper grid, so the camera starts further back and may
//! orbit further out. Everything here is a pure function of the week count.

use super::calendar::{CalendarDataset, DAYS_IN_WEEK};
use super::layout::{resolve_week_count, Position3, SPACING};

pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const MIN_DISTANCE: f32 = 5.0;
/// Lower bound for `max_distance` so tiny datasets still leave room to zoom out.
pub const MIN_ZOOM_OUT: f32 = 20.0;
pub const GROUND_LEVEL: f32 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub position: Position3,
    pub target: Position3,
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height of the floating title label above the grid.
    pub label_height: f32,
    /// Scale factor for the floating title label.
    pub label_scale: f32,
    /// Ground plane extent along x (columns) and z (weeks).
    pub ground_size: (f32, f32),
}

impl CameraFraming {
    pub fn initial_distance(&self) -> f32 {
        self.position.length()
    }
}

pub fn frame(week_count: usize) -> CameraFraming {
    let weeks = week_count.max(1) as f32;

    let min_distance = MIN_DISTANCE;
    let max_distance = (weeks * 2.0).max(MIN_ZOOM_OUT);

    let raw_position = Position3::new(0.0, weeks * 0.5, weeks * 0.7);
    let raw_distance = raw_position.length();
    let distance = raw_distance.clamp(min_distance, max_distance);
    let position = raw_position * (distance / raw_distance);

    CameraFraming {
        position,
        target: Position3::ZERO,
        fov_degrees: FIELD_OF_VIEW_DEGREES,
        min_distance,
        max_distance,
        label_height: weeks * 0.35,
        label_scale: weeks * 0.15,
        ground_size: (
            DAYS_IN_WEEK as f32 * SPACING * 1.5,
            weeks * SPACING * 1.2,
        ),
    }
}

/// Framing for whatever is on screen; falls back to the default year while empty.
pub fn framing_for(dataset: Option<&CalendarDataset>) -> CameraFraming {
    frame(resolve_week_count(dataset))
}
