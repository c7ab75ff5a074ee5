//! Core types for posecheck-rs.
//!
//! This crate provides the pieces that do not depend on rendering:
//! - [`CameraRecord`], a camera pose derived from a camera-to-world transform
//! - the transforms-file loader ([`load_camera_data`])
//! - the [`MarkerPath`] camera glyph used as a scatter marker
//! - equal-aspect [`AxisLimits`]
//! - [`PlotOptions`] configuration

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Option fields like `arrow_length` repeat the struct's domain on purpose
#![allow(clippy::struct_field_names)]

pub mod bounds;
pub mod camera;
pub mod error;
pub mod loader;
pub mod marker;
pub mod options;

pub use bounds::AxisLimits;
pub use camera::CameraRecord;
pub use error::{PosecheckError, Result};
pub use loader::{load_camera_data, parse_camera_data, parse_camera_number};
pub use marker::{MarkerPath, PathCode};
pub use options::{PlotOptions, PlotStyle, ProjectionMode, ViewAngles};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Vec2, Vec3};
