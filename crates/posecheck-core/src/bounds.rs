//! Equal-aspect axis limits for 3D plots.

use glam::Vec3;

/// Axis limits sharing one half-range, so the plotted volume is a cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    /// Midpoint of each axis.
    pub center: Vec3,
    /// Half of the largest per-axis span.
    pub half_range: f32,
}

impl AxisLimits {
    /// Computes cube-shaped limits around a set of points.
    ///
    /// Each axis is centred on the midpoint of its extent; all three share
    /// half of the largest span. Returns `None` for an empty input.
    #[must_use]
    pub fn equal_aspect(positions: &[Vec3]) -> Option<Self> {
        let first = *positions.first()?;
        let (min, max) = positions
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self {
            center: (min + max) * 0.5,
            half_range: (max - min).max_element() / 2.0,
        })
    }

    /// Limits of axis `i` (0 = X, 1 = Y, 2 = Z).
    #[must_use]
    pub fn axis(&self, i: usize) -> (f32, f32) {
        let c = self.center[i];
        (c - self.half_range, c + self.half_range)
    }
}
