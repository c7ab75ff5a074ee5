//! Marker glyphs for scatter plots.

use glam::Vec2;

/// Drawing command for a path vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCode {
    /// Start a new sub-path at this vertex.
    MoveTo,
    /// Straight line to this vertex.
    LineTo,
    /// Close the current sub-path. The vertex itself is ignored.
    ClosePoly,
}

/// A 2D outline used as a scatter marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPath {
    vertices: Vec<Vec2>,
    codes: Vec<PathCode>,
}

impl MarkerPath {
    /// A simple camera icon: a body with a trapezoidal viewfinder notch on top.
    #[must_use]
    pub fn camera() -> Self {
        let vertices = vec![
            Vec2::new(0.0, 0.2), // bottom left of body
            Vec2::new(0.0, 0.8), // top left
            Vec2::new(0.2, 0.8), // notch start
            Vec2::new(0.3, 1.0), // notch top left
            Vec2::new(0.7, 1.0), // notch top right
            Vec2::new(0.8, 0.8), // notch end
            Vec2::new(1.0, 0.8), // top right
            Vec2::new(1.0, 0.2), // bottom right
            Vec2::new(0.0, 0.2), // close
        ];
        let mut codes = vec![PathCode::LineTo; vertices.len()];
        codes[0] = PathCode::MoveTo;
        codes[8] = PathCode::ClosePoly;
        Self { vertices, codes }
    }

    /// Path vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Path codes, one per vertex.
    #[must_use]
    pub fn codes(&self) -> &[PathCode] {
        &self.codes
    }

    /// Axis-aligned bounds as (min, max).
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), v| (min.min(*v), max.max(*v)),
        )
    }

    /// Returns a copy centred on the origin whose largest half-extent is 0.5.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (min, max) = self.bounds();
        let center = (min + max) * 0.5;
        let half = ((max - min) * 0.5).max_element();
        let scale = if half > 0.0 { 0.5 / half } else { 1.0 };
        Self {
            vertices: self.vertices.iter().map(|v| (*v - center) * scale).collect(),
            codes: self.codes.clone(),
        }
    }

    /// Splits the path into closed rings, suitable for polygon filling.
    #[must_use]
    pub fn polygons(&self) -> Vec<Vec<Vec2>> {
        let mut rings = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        for (v, code) in self.vertices.iter().zip(&self.codes) {
            match code {
                PathCode::MoveTo => {
                    if current.len() > 1 {
                        rings.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(*v);
                }
                PathCode::LineTo => current.push(*v),
                PathCode::ClosePoly => {
                    if current.len() > 1 {
                        rings.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if current.len() > 1 {
            rings.push(current);
        }
        rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_marker_shape() {
        let marker = MarkerPath::camera();
        assert_eq!(marker.vertices().len(), 9);
        assert_eq!(marker.codes()[0], PathCode::MoveTo);
        assert_eq!(marker.codes()[8], PathCode::ClosePoly);
        assert!(marker.codes()[1..8].iter().all(|c| *c == PathCode::LineTo));
        let (min, max) = marker.bounds();
        assert_eq!(min, Vec2::new(0.0, 0.2));
        assert_eq!(max, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_normalized_is_centred() {
        let marker = MarkerPath::camera().normalized();
        let (min, max) = marker.bounds();
        assert!(((min + max) * 0.5).length() < 1e-6);
        assert!((max.x - 0.5).abs() < 1e-6);
        assert!((min.x + 0.5).abs() < 1e-6);
        assert!((max.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_polygons_single_ring() {
        let rings = MarkerPath::camera().polygons();
        assert_eq!(rings.len(), 1);
        // The ClosePoly vertex is not part of the ring.
        assert_eq!(rings[0].len(), 8);
    }
}
