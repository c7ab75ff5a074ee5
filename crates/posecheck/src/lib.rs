//! posecheck-rs: plot camera poses from a scene-calibration file.
//!
//! Reads a Nerfstudio-style `transforms.json`, derives each camera's position
//! and viewing direction from its camera-to-world transform, and renders them
//! as camera-shaped markers with direction arrows and numeric labels. Two
//! images are written: the default oblique view and a top-down view.
//!
//! # Quick Start
//!
//! ```no_run
//! use posecheck::*;
//!
//! fn main() -> Result<()> {
//!     let cameras = load_camera_data("transforms.json")?;
//!     let options = PlotOptions {
//!         arrow_length: 3.0,
//!         ..PlotOptions::default()
//!     };
//!     plot_and_save_cameras(&cameras, &options, "default.png", "top.png")
//! }
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod plot;

// Re-export core types
pub use posecheck_core::{
    bounds::AxisLimits,
    camera::CameraRecord,
    error::{PosecheckError, Result},
    loader::{load_camera_data, parse_camera_data, parse_camera_number},
    marker::{MarkerPath, PathCode},
    options::{PlotOptions, PlotStyle, ProjectionMode, ViewAngles},
    Mat4, Vec2, Vec3,
};

// Re-export render types
pub use posecheck_render::{Figure, RenderError, SaveOptions};

pub use plot::{
    arrow_endpoint, build_figure, label_anchor, normalized_direction, plot_and_save_cameras,
};
