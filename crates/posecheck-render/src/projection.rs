//! 3D view transforms and screen projection.

use glam::{Vec2, Vec3};
use posecheck_core::{ProjectionMode, ViewAngles};

/// Maps data-space points to the screen.
///
/// The result holds the pixel position in `x`/`y` and the distance from the
/// eye in `z` (larger is farther away).
pub trait Projector {
    fn project(&self, point: Vec3) -> Vec3;

    /// Smallest depth that projects sensibly, if the projection has one.
    ///
    /// Geometry nearer than this must be clipped before projecting.
    fn near_depth(&self) -> Option<f32> {
        None
    }

    /// Pixel position only.
    fn project_2d(&self, point: Vec3) -> Vec2 {
        self.project(point).truncate()
    }
}

/// Orbit view of the unit plot cube, defined by elevation and azimuth.
///
/// Z is up. At elevation 90 and azimuth -90 the view looks straight down
/// with +X to the right and +Y towards the top of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    distance: f32,
    mode: ProjectionMode,
}

impl ViewTransform {
    /// Eye distance from the cube centre, in normalized cube units.
    pub const DEFAULT_DISTANCE: f32 = 4.0;

    /// Near plane as a fraction of the eye distance. The whole plot cube lies
    /// beyond it, and nothing in front of it is enlarged more than twofold.
    pub const NEAR_FRACTION: f32 = 0.5;

    #[must_use]
    pub fn new(angles: ViewAngles, mode: ProjectionMode) -> Self {
        let elev = angles.elev.to_radians();
        let azim = angles.azim.to_radians();
        let eye = Vec3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin());
        let right = Vec3::new(-azim.sin(), azim.cos(), 0.0);
        let up = eye.cross(right);
        Self {
            eye,
            right,
            up,
            distance: Self::DEFAULT_DISTANCE,
            mode,
        }
    }

    /// Unit vector from the cube centre towards the viewer.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Near-plane depth for perspective views; orthographic views have none.
    #[must_use]
    pub fn near_depth(&self) -> Option<f32> {
        match self.mode {
            ProjectionMode::Perspective => Some(self.distance * Self::NEAR_FRACTION),
            ProjectionMode::Orthographic => None,
        }
    }

    /// Projects a point in normalized cube coordinates (each axis in [-0.5, 0.5]).
    ///
    /// Returns screen-plane x/y (y up) and the distance from the eye.
    #[must_use]
    pub fn project(&self, n: Vec3) -> Vec3 {
        let depth = self.distance - n.dot(self.eye);
        let s = match self.mode {
            ProjectionMode::Perspective => self.distance / depth.max(1e-3),
            ProjectionMode::Orthographic => 1.0,
        };
        Vec3::new(n.dot(self.right) * s, n.dot(self.up) * s, depth)
    }
}

/// Projection from data coordinates to pixels for one axes viewport.
#[derive(Debug, Clone, Copy)]
pub struct ScreenProjection {
    view: ViewTransform,
    lo: Vec3,
    span: Vec3,
    origin: Vec2,
    scale: f32,
}

impl ScreenProjection {
    /// `lo`/`span` describe the axis limits; `origin` is the pixel position of
    /// the cube centre and `scale` the pixels per screen-plane unit.
    #[must_use]
    pub fn new(view: ViewTransform, lo: Vec3, span: Vec3, origin: Vec2, scale: f32) -> Self {
        Self {
            view,
            lo,
            span,
            origin,
            scale,
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Data coordinates to normalized cube coordinates.
    #[must_use]
    pub fn normalize(&self, point: Vec3) -> Vec3 {
        (point - self.lo) / self.span - Vec3::splat(0.5)
    }

    /// Projects a point given in normalized cube coordinates.
    #[must_use]
    pub fn project_normalized(&self, n: Vec3) -> Vec3 {
        let v = self.view.project(n);
        Vec3::new(
            self.origin.x + v.x * self.scale,
            self.origin.y - v.y * self.scale,
            v.z,
        )
    }
}

impl Projector for ScreenProjection {
    fn project(&self, point: Vec3) -> Vec3 {
        self.project_normalized(self.normalize(point))
    }

    fn near_depth(&self) -> Option<f32> {
        self.view.near_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top() -> ViewTransform {
        ViewTransform::new(ViewAngles::TOP, ProjectionMode::Orthographic)
    }

    #[test]
    fn test_top_view_axes() {
        let view = top();
        let x = view.project(Vec3::new(0.5, 0.0, 0.0));
        let y = view.project(Vec3::new(0.0, 0.5, 0.0));
        assert!((x.x - 0.5).abs() < 1e-5 && x.y.abs() < 1e-5);
        assert!((y.y - 0.5).abs() < 1e-5 && y.x.abs() < 1e-5);
        // Higher points are closer to an overhead eye.
        let high = view.project(Vec3::new(0.0, 0.0, 0.5));
        let low = view.project(Vec3::new(0.0, 0.0, -0.5));
        assert!(high.z < low.z);
    }

    #[test]
    fn test_default_view_z_is_up() {
        let view = ViewTransform::new(ViewAngles::DEFAULT, ProjectionMode::Perspective);
        let p = view.project(Vec3::new(0.0, 0.0, 0.5));
        assert!(p.y > 0.0);
        assert!(p.x.abs() < 1e-5);
        assert!((view.eye().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_enlarges_near_points() {
        let view = ViewTransform::new(ViewAngles::TOP, ProjectionMode::Perspective);
        let near = view.project(Vec3::new(0.5, 0.0, 0.5));
        let far = view.project(Vec3::new(0.5, 0.0, -0.5));
        assert!(near.x > far.x);
    }

    #[test]
    fn test_screen_projection_maps_limits() {
        let proj = ScreenProjection::new(
            top(),
            Vec3::new(-2.0, -2.0, -2.0),
            Vec3::splat(4.0),
            Vec2::new(100.0, 100.0),
            50.0,
        );
        let centre = proj.project_2d(Vec3::ZERO);
        assert!((centre - Vec2::new(100.0, 100.0)).length() < 1e-3);
        let corner = proj.project_2d(Vec3::new(2.0, 2.0, 0.0));
        // +X right, +Y up (pixel y decreases).
        assert!((corner - Vec2::new(125.0, 75.0)).length() < 1e-3);
    }

    #[test]
    fn test_near_plane_only_in_perspective() {
        let persp = ViewTransform::new(ViewAngles::DEFAULT, ProjectionMode::Perspective);
        assert_eq!(persp.near_depth(), Some(2.0));
        assert_eq!(top().near_depth(), None);
        // Every cube corner lies beyond the near plane.
        for corner in [Vec3::splat(0.5), Vec3::splat(-0.5), Vec3::new(0.5, -0.5, 0.5)] {
            assert!(persp.project(corner).z > 2.0);
        }
    }
}
