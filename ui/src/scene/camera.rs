//! Orbit camera and perspective projection onto the SVG viewport.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::core::{CameraFraming, Position3};

/// Logical size of the rendered frame; the SVG scales to its container.
pub const VIEWPORT_WIDTH: f32 = 1200.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;

const MIN_POLAR: f32 = 0.05;
const MAX_POLAR: f32 = FRAC_PI_2 - 0.05;
const NEAR_PLANE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Spherical camera around a target, bounded by the framing's distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Position3,
    pub distance: f32,
    /// Rotation around the vertical axis, radians; 0 looks down -z.
    pub azimuth: f32,
    /// Angle from straight up, radians.
    pub polar: f32,
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn from_framing(framing: &CameraFraming) -> Self {
        let offset = framing.position - framing.target;
        let distance = offset.length().max(f32::EPSILON);

        Self {
            target: framing.target,
            distance: distance.clamp(framing.min_distance, framing.max_distance),
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos().clamp(MIN_POLAR, MAX_POLAR),
            fov_degrees: framing.fov_degrees,
            min_distance: framing.min_distance,
            max_distance: framing.max_distance,
        }
    }

    pub fn eye(&self) -> Position3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + Position3::new(
                self.distance * sin_polar * sin_azimuth,
                self.distance * cos_polar,
                self.distance * sin_polar * cos_azimuth,
            )
    }

    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar = (self.polar + delta_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Multiply the distance by `factor`, staying inside the orbit bounds.
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn projector(&self, viewport: Viewport) -> Projector {
        let eye = self.eye();
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let fov = self.fov_degrees.to_radians().max(0.02);
        let aspect = viewport.width / viewport.height.max(1.0);
        let projection = Mat4::perspective_infinite_rh(fov, aspect, NEAR_PLANE);

        Projector {
            eye,
            view,
            view_projection: projection * view,
            focal: projection.y_axis.y * viewport.height / 2.0,
            viewport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction.
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub eye: Position3,
    view: Mat4,
    view_projection: Mat4,
    /// Pixels per world unit at depth 1.
    pub focal: f32,
    viewport: Viewport,
}

impl Projector {
    pub fn depth(&self, point: Position3) -> f32 {
        -self.view.transform_point3(point).z
    }

    /// `None` for points behind the near plane.
    pub fn project(&self, point: Position3) -> Option<ScreenPoint> {
        let depth = self.depth(point);
        if depth <= NEAR_PLANE {
            return None;
        }
        let ndc = self.view_projection.project_point3(point);
        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.viewport.width,
            y: (1.0 - ndc.y) * 0.5 * self.viewport.height,
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame;

    const FIELD_OF_VIEW: f32 = std::f32::consts::FRAC_PI_4;

    #[test]
    fn framing_round_trips_through_orbit_parameters() {
        let framing = frame(52);
        let camera = OrbitCamera::from_framing(&framing);
        let eye = camera.eye();
        assert!((eye.x - framing.position.x).abs() < 1e-3);
        assert!((eye.y - framing.position.y).abs() < 1e-3);
        assert!((eye.z - framing.position.z).abs() < 1e-3);
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let camera = OrbitCamera::from_framing(&frame(52));
        let point = camera
            .projector(Viewport::default())
            .project(Position3::ZERO)
            .unwrap();
        assert!((point.x - VIEWPORT_WIDTH / 2.0).abs() < 1e-2);
        assert!((point.y - VIEWPORT_HEIGHT / 2.0).abs() < 1e-2);
    }

    #[test]
    fn screen_offset_scales_with_focal_length_over_depth() {
        let camera = OrbitCamera::from_framing(&frame(52));
        let projector = camera.projector(Viewport::default());
        let expected_focal = (VIEWPORT_HEIGHT / 2.0) / (FIELD_OF_VIEW / 2.0).tan();
        assert!((projector.focal - expected_focal).abs() < 1e-2);

        // Azimuth 0 puts world +x on screen right.
        let point = projector.project(Position3::X).unwrap();
        assert!((point.depth - camera.distance).abs() < 1e-3);
        let offset = point.x - VIEWPORT_WIDTH / 2.0;
        assert!((offset - projector.focal / camera.distance).abs() < 1e-2);
        assert!((point.y - VIEWPORT_HEIGHT / 2.0).abs() < 1e-2);
    }

    #[test]
    fn zoom_respects_bounds() {
        let framing = frame(10);
        let mut camera = OrbitCamera::from_framing(&framing);
        camera.zoom(1000.0);
        assert_eq!(camera.distance, framing.max_distance);
        camera.zoom(0.0001);
        assert_eq!(camera.distance, framing.min_distance);
    }

    #[test]
    fn camera_never_dips_below_the_grid() {
        let mut camera = OrbitCamera::from_framing(&frame(52));
        camera.rotate(0.3, 10.0);
        assert!(camera.eye().y > 0.0);
        camera.rotate(0.0, -10.0);
        assert!(camera.polar >= MIN_POLAR);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let camera = OrbitCamera::from_framing(&frame(52));
        let projector = camera.projector(Viewport::default());
        let behind = camera.eye() + (camera.eye() - camera.target);
        assert!(projector.project(behind).is_none());
    }
}
