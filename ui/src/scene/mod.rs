//! Render surface: orbit camera, projected bar geometry and the hover layer.

pub mod camera;
pub mod interaction;
pub mod mesh;
pub mod svg;

use std::sync::Arc;

use crate::core::CalendarDataset;

pub use camera::{OrbitCamera, Viewport};
pub use interaction::{HoverState, Tooltip};
pub use mesh::{build_frame, SceneFrame};
pub use svg::{render_markup, SceneLabels};

/// What is currently on screen. The scene view publishes one of these while it
/// is mounted so the exporter can re-render the exact same view.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSurface {
    pub username: String,
    pub dataset: Arc<CalendarDataset>,
    pub camera: OrbitCamera,
    pub labels: SceneLabels,
}

impl SceneSurface {
    pub fn frame(&self) -> SceneFrame {
        build_frame(&self.dataset, &self.camera, Viewport::default())
    }

    pub fn markup(&self) -> String {
        render_markup(&self.frame(), &self.labels)
    }
}
