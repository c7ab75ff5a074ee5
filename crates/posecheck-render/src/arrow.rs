//! 3D arrows.
//!
//! An [`Arrow3D`] only stores its 3D endpoints and style. Projection is
//! supplied by the axes through the [`Projector`] trait at draw time.

use glam::{Vec2, Vec3};

use crate::canvas::{rgba, Canvas};
use crate::projection::Projector;

/// Visual style of an arrow with a filled triangular head (`-|>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    /// Color as RGB in [0, 1].
    pub color: Vec3,
    /// Shaft width in points.
    pub line_width: f32,
    /// Scale of the head, in points.
    pub mutation_scale: f32,
    /// Head length relative to `mutation_scale`.
    pub head_length: f32,
    /// Head half-width relative to `mutation_scale`.
    pub head_width: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 0.0, 0.0),
            line_width: 2.0,
            mutation_scale: 20.0,
            head_length: 0.4,
            head_width: 0.2,
        }
    }
}

/// An arrow between two points in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow3D {
    pub start: Vec3,
    pub end: Vec3,
    pub style: ArrowStyle,
}

/// An arrow after projection to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedArrow {
    pub start: Vec2,
    pub end: Vec2,
    /// Distance of the nearest endpoint from the eye.
    pub depth: f32,
}

impl Arrow3D {
    #[must_use]
    pub fn new(start: Vec3, end: Vec3, style: ArrowStyle) -> Self {
        Self { start, end, style }
    }

    /// Projects both endpoints, clipping the arrow at the projector's near
    /// plane. Returns `None` when the arrow lies entirely in front of it.
    pub fn project(&self, projector: &impl Projector) -> Option<ProjectedArrow> {
        let (mut start, mut end) = (self.start, self.end);
        if let Some(near) = projector.near_depth() {
            // Depth is affine in the data coordinates, so the crossing can be
            // found by linear interpolation.
            let (da, db) = (projector.project(start).z, projector.project(end).z);
            match (da >= near, db >= near) {
                (true, true) => {}
                (true, false) => end = start + (end - start) * ((da - near) / (da - db)),
                (false, true) => start = end + (start - end) * ((db - near) / (db - da)),
                (false, false) => return None,
            }
        }
        let a = projector.project(start);
        let b = projector.project(end);
        Some(ProjectedArrow {
            start: a.truncate(),
            end: b.truncate(),
            depth: a.z.min(b.z),
        })
    }

    /// Draws the arrow. Sizes in points are converted with `px_per_pt`.
    pub fn draw(&self, canvas: &mut Canvas, projector: &impl Projector, px_per_pt: f32) {
        let Some(projected) = self.project(projector) else {
            return;
        };
        let color = rgba(self.style.color);
        let shaft = projected.end - projected.start;
        let len = shaft.length();
        let width = self.style.line_width * px_per_pt;
        if len < 1e-3 {
            canvas.fill_circle(projected.start, width * 0.5, color);
            return;
        }

        let dir = shaft / len;
        let head_len = (self.style.head_length * self.style.mutation_scale * px_per_pt).min(len);
        let head_half = self.style.head_width * self.style.mutation_scale * px_per_pt;
        let head_base = projected.end - dir * head_len;
        let normal = Vec2::new(-dir.y, dir.x) * head_half;

        canvas.draw_line(projected.start, head_base, width, color);
        canvas.fill_polygon(
            &[projected.end, head_base + normal, head_base - normal],
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat;

    impl Projector for Flat {
        fn project(&self, p: Vec3) -> Vec3 {
            Vec3::new(p.x, p.y, 10.0 - p.z)
        }
    }

    #[test]
    fn test_project_depth_is_nearest_endpoint() {
        let arrow = Arrow3D::new(Vec3::new(1.0, 2.0, 0.0), Vec3::new(3.0, 4.0, 5.0), ArrowStyle::default());
        let p = arrow.project(&Flat).unwrap();
        assert_eq!(p.start, Vec2::new(1.0, 2.0));
        assert_eq!(p.end, Vec2::new(3.0, 4.0));
        assert_eq!(p.depth, 5.0);
    }

    /// Like `Flat`, with a near plane at depth 4.
    struct Clipped;

    impl Projector for Clipped {
        fn project(&self, p: Vec3) -> Vec3 {
            Flat.project(p)
        }

        fn near_depth(&self) -> Option<f32> {
            Some(4.0)
        }
    }

    #[test]
    fn test_arrow_crossing_near_plane_is_clipped() {
        // Depths run from 10 at the start to 0 at the end.
        let arrow = Arrow3D::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0), ArrowStyle::default());
        let p = arrow.project(&Clipped).unwrap();
        assert_eq!(p.start, Vec2::ZERO);
        assert!((p.end - Vec2::new(6.0, 0.0)).length() < 1e-5);
        assert!((p.depth - 4.0).abs() < 1e-5);

        let reversed = Arrow3D::new(arrow.end, arrow.start, ArrowStyle::default());
        let p = reversed.project(&Clipped).unwrap();
        assert!((p.start - Vec2::new(6.0, 0.0)).length() < 1e-5);
        assert_eq!(p.end, Vec2::ZERO);
    }

    #[test]
    fn test_arrow_behind_near_plane_is_skipped() {
        let arrow = Arrow3D::new(Vec3::new(0.0, 0.0, 7.0), Vec3::new(5.0, 5.0, 9.0), ArrowStyle::default());
        assert!(arrow.project(&Clipped).is_none());

        let mut canvas = Canvas::new(20, 20, image::Rgba([255, 255, 255, 255]));
        arrow.draw(&mut canvas, &Clipped, 1.0);
        assert!(canvas.into_image().pixels().all(|p| *p == image::Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_draw_paints_head_and_shaft() {
        let mut canvas = Canvas::new(60, 20, image::Rgba([255, 255, 255, 255]));
        let arrow = Arrow3D::new(Vec3::new(5.0, 10.0, 0.0), Vec3::new(55.0, 10.0, 0.0), ArrowStyle::default());
        arrow.draw(&mut canvas, &Flat, 1.0);
        let red = image::Rgba([255, 0, 0, 255]);
        assert_eq!(canvas.pixel(10, 10), Some(red));
        assert_eq!(canvas.pixel(50, 10), Some(red));
        assert_eq!(canvas.pixel(10, 2), Some(image::Rgba([255, 255, 255, 255])));
    }
}
