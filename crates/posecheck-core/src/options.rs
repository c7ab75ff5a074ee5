//! Plot configuration.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Options controlling how camera poses are plotted and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Length of the viewing-direction arrows, in world units.
    pub arrow_length: f32,

    /// Distance behind each camera at which its number is drawn.
    pub label_offset: f32,

    /// Export resolution in dots per inch.
    pub dpi: u32,

    /// Figure size in inches (width, height).
    pub figure_size: [f32; 2],

    /// Marker area in points squared.
    pub marker_size: f32,

    /// Figure title.
    pub title: String,

    /// Projection used for both views.
    pub projection: ProjectionMode,

    /// View used for the second (top-down) image.
    pub top_view: ViewAngles,

    /// Whether saved images are cropped to their content.
    pub tight_bbox: bool,

    /// Colors.
    pub style: PlotStyle,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            arrow_length: 0.4,
            label_offset: 0.9,
            dpi: 300,
            figure_size: [10.0, 8.0],
            marker_size: 200.0,
            title: "Camera Positions and Viewing Directions".to_string(),
            projection: ProjectionMode::Perspective,
            top_view: ViewAngles::TOP,
            tight_bbox: true,
            style: PlotStyle::default(),
        }
    }
}

impl PlotOptions {
    /// Reads options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().merged_with_json_file(path)
    }

    /// Returns these options with the keys present in a JSON file replaced.
    ///
    /// Nested objects (`style`, `top_view`) are merged key by key, so a file
    /// can change a single color or angle.
    pub fn merged_with_json_file(&self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let overrides: Value = serde_json::from_str(&contents)?;
        let mut merged = serde_json::to_value(self)?;
        merge_json(&mut merged, overrides);
        log::debug!("plot options merged from {}", path.display());
        Ok(serde_json::from_value(merged)?)
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// Colors used by the plot, as RGB in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub background: Vec3,
    pub pane: Vec3,
    pub grid: Vec3,
    pub text: Vec3,
    pub marker_face: Vec3,
    pub marker_edge: Vec3,
    pub arrow: Vec3,
    pub label: Vec3,
}

impl Default for PlotStyle {
    fn default() -> Self {
        // ggplot-like: grey panes with white grid lines.
        Self {
            background: Vec3::ONE,
            pane: Vec3::splat(0.898),
            grid: Vec3::ONE,
            text: Vec3::splat(0.3),
            marker_face: Vec3::ZERO,
            marker_edge: Vec3::ONE,
            arrow: Vec3::new(1.0, 0.0, 0.0),
            label: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Camera projection used when rendering the 3D axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// Viewing angles of a 3D plot, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewAngles {
    /// Elevation above the XY plane.
    pub elev: f32,
    /// Azimuth about the Z axis.
    pub azim: f32,
}

impl ViewAngles {
    /// The default oblique view.
    pub const DEFAULT: Self = Self {
        elev: 30.0,
        azim: -60.0,
    };

    /// Looking straight down with +X to the right and +Y up.
    pub const TOP: Self = Self {
        elev: 90.0,
        azim: -90.0,
    };
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts: PlotOptions = serde_json::from_str(r#"{"arrow_length": 3.0, "dpi": 72}"#).unwrap();
        assert_eq!(opts.arrow_length, 3.0);
        assert_eq!(opts.dpi, 72);
        assert_eq!(opts.label_offset, 0.9);
        assert_eq!(opts.top_view, ViewAngles::TOP);
        assert_eq!(opts.style, PlotStyle::default());
    }

    #[test]
    fn test_options_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{"projection": "Orthographic", "style": {"arrow": [0.0, 1.0, 0.0]}}"#)
            .unwrap();
        let opts = PlotOptions::from_json_file(&path).unwrap();
        assert_eq!(opts.projection, ProjectionMode::Orthographic);
        assert_eq!(opts.style.arrow, Vec3::Y);
        assert_eq!(opts.style.label, PlotStyle::default().label);
    }

    #[test]
    fn test_bad_options_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, "{ arrow_length: }").unwrap();
        let err = PlotOptions::from_json_file(&path).unwrap_err();
        assert!(matches!(err, crate::PosecheckError::JsonError(_)));
    }

    #[test]
    fn test_partial_view_angles_keep_other_angle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{"top_view": {"elev": 80.0}}"#).unwrap();
        let opts = PlotOptions::from_json_file(&path).unwrap();
        assert_eq!(opts.top_view, ViewAngles { elev: 80.0, azim: -90.0 });

        let angles: ViewAngles = serde_json::from_str(r#"{"azim": 10.0}"#).unwrap();
        assert_eq!(angles, ViewAngles { elev: 30.0, azim: 10.0 });
    }

    #[test]
    fn test_merge_keeps_base_values_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{"dpi": 72, "style": {"label": [0.0, 1.0, 0.0]}}"#).unwrap();
        let base = PlotOptions {
            arrow_length: 3.0,
            ..PlotOptions::default()
        };
        let opts = base.merged_with_json_file(&path).unwrap();
        assert_eq!(opts.arrow_length, 3.0);
        assert_eq!(opts.dpi, 72);
        assert_eq!(opts.style.label, Vec3::Y);
        assert_eq!(opts.style.arrow, base.style.arrow);
    }
}
