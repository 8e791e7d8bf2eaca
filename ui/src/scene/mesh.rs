//! Turns a dataset and a camera into painter-ordered screen polygons.
//!
//! Each day becomes a box standing on its grid cell. Only faces turned
//! towards the camera are kept, and bars are emitted far to near so later
//! polygons correctly cover earlier ones.

use crate::core::framing::GROUND_LEVEL;
use crate::core::layout::BAR_WIDTH;
use crate::core::{
    encode, framing_for, layout_cell, CalendarDataset, CameraFraming, DayRecord, EncodedBar, GridCell,
    Position3, Rgb,
};

use super::camera::{OrbitCamera, Projector, Viewport};

const AMBIENT: f32 = 0.55;
/// Direction towards the key light.
const LIGHT: Position3 = Position3::new(20.0, 30.0, 20.0);
const LABEL_FONT_FACTOR: f32 = 0.15;
const LABEL_MIN_PX: f32 = 12.0;
const LABEL_MAX_PX: f32 = 40.0;

/// One day with everything the render surface needs: where it stands and how it looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarInstance {
    pub index: usize,
    pub day: DayRecord,
    pub cell: GridCell,
    pub bar: EncodedBar,
}

/// Lay out and encode every day of the dataset, in dataset order.
pub fn bar_instances(dataset: &CalendarDataset) -> Vec<BarInstance> {
    let max_count = dataset.max_count();
    dataset
        .days
        .iter()
        .enumerate()
        .map(|(index, day)| BarInstance {
            index,
            day: *day,
            cell: layout_cell(index, dataset.week_count),
            bar: encode(day.count, max_count),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub points: Vec<(f32, f32)>,
    /// Lambert factor in `AMBIENT..=1`.
    pub shade: f32,
}

impl Face {
    pub fn points_attr(&self) -> String {
        points_attr(&self.points)
    }

    pub fn fill(&self, base: Rgb) -> String {
        base.scaled(self.shade).to_hex()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedBar {
    pub instance: BarInstance,
    pub faces: Vec<Face>,
    pub depth: f32,
    /// Screen point just above the bar, used to anchor the tooltip.
    pub anchor: (f32, f32),
}

impl ProjectedBar {
    pub fn key(&self) -> String {
        self.instance.day.iso_date()
    }

    pub fn color(&self) -> Rgb {
        self.instance.bar.bucket.color()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f32,
    pub y: f32,
    pub font_px: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub viewport: Viewport,
    pub ground: Option<Vec<(f32, f32)>>,
    /// Far to near.
    pub bars: Vec<ProjectedBar>,
    pub label: Option<LabelPlacement>,
}

impl SceneFrame {
    /// Tooltip anchor of the bar for day `index`, if that bar is visible.
    pub fn anchor_of(&self, index: usize) -> Option<(f32, f32)> {
        self.bars
            .iter()
            .find(|bar| bar.instance.index == index)
            .map(|bar| bar.anchor)
    }
}

pub fn build_frame(dataset: &CalendarDataset, camera: &OrbitCamera, viewport: Viewport) -> SceneFrame {
    let framing = framing_for(Some(dataset));
    let projector = camera.projector(viewport);
    let light = LIGHT.normalize();

    let mut bars: Vec<ProjectedBar> = bar_instances(dataset)
        .into_iter()
        .filter_map(|instance| project_bar(instance, &projector, light))
        .collect();
    bars.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    SceneFrame {
        viewport,
        ground: project_ground(&framing, &projector),
        bars,
        label: place_label(&framing, &projector),
    }
}

fn project_bar(instance: BarInstance, projector: &Projector, light: Position3) -> Option<ProjectedBar> {
    let (x, z) = (instance.cell.position.x, instance.cell.position.z);
    let half = BAR_WIDTH / 2.0;
    let height = instance.bar.height;
    let (x0, x1, z0, z1) = (x - half, x + half, z - half, z + half);

    let corner = |x: f32, y: f32, z: f32| Position3::new(x, y, z);
    let faces: [(Position3, [Position3; 4]); 5] = [
        (
            Position3::Y,
            [corner(x0, height, z0), corner(x1, height, z0), corner(x1, height, z1), corner(x0, height, z1)],
        ),
        (
            Position3::X,
            [corner(x1, 0.0, z0), corner(x1, height, z0), corner(x1, height, z1), corner(x1, 0.0, z1)],
        ),
        (
            Position3::NEG_X,
            [corner(x0, 0.0, z0), corner(x0, 0.0, z1), corner(x0, height, z1), corner(x0, height, z0)],
        ),
        (
            Position3::Z,
            [corner(x0, 0.0, z1), corner(x1, 0.0, z1), corner(x1, height, z1), corner(x0, height, z1)],
        ),
        (
            Position3::NEG_Z,
            [corner(x0, 0.0, z0), corner(x0, height, z0), corner(x1, height, z0), corner(x1, 0.0, z0)],
        ),
    ];

    let mut projected = Vec::with_capacity(3);
    for (normal, corners) in faces {
        let centre = corners.iter().copied().sum::<Position3>() * 0.25;
        if normal.dot(projector.eye - centre) <= 0.0 {
            continue;
        }
        let points: Option<Vec<(f32, f32)>> = corners
            .iter()
            .map(|c| projector.project(*c).map(|p| (p.x, p.y)))
            .collect();
        if let Some(points) = points {
            projected.push(Face {
                points,
                shade: AMBIENT + (1.0 - AMBIENT) * normal.dot(light).max(0.0),
            });
        }
    }

    if projected.is_empty() {
        return None;
    }

    let centre = Position3::new(x, height / 2.0, z);
    let anchor = projector
        .project(Position3::new(x, height + 0.5, z))
        .map(|p| (p.x, p.y))
        .unwrap_or_default();

    Some(ProjectedBar {
        instance,
        faces: projected,
        depth: projector.depth(centre),
        anchor,
    })
}

fn project_ground(framing: &CameraFraming, projector: &Projector) -> Option<Vec<(f32, f32)>> {
    let (width, depth) = framing.ground_size;
    let (hw, hd) = (width / 2.0, depth / 2.0);
    [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)]
        .into_iter()
        .map(|(x, z)| {
            projector
                .project(Position3::new(x, GROUND_LEVEL, z))
                .map(|p| (p.x, p.y))
        })
        .collect()
}

fn place_label(framing: &CameraFraming, projector: &Projector) -> Option<LabelPlacement> {
    let anchor = projector.project(Position3::new(0.0, framing.label_height, 0.0))?;
    let font_px = (LABEL_FONT_FACTOR * framing.label_scale * projector.focal / anchor.depth)
        .clamp(LABEL_MIN_PX, LABEL_MAX_PX);
    Some(LabelPlacement {
        x: anchor.x,
        y: anchor.y,
        font_px,
    })
}

pub fn points_attr(points: &[(f32, f32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}
