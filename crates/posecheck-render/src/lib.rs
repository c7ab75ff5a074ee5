//! Rendering backend for posecheck-rs.
//!
//! A small software 3D plotting layer: a [`Figure`] owns an [`Axes3D`] that
//! collects scatter markers, [`Arrow3D`]s and text, projects them with an
//! elevation/azimuth view, rasterizes them onto a [`Canvas`] and writes the
//! result with the `image` crate.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Plain setters on axes and figures
#![allow(clippy::return_self_not_must_use)]

pub mod arrow;
pub mod axes;
pub mod canvas;
pub mod error;
pub mod figure;
pub mod font;
pub mod projection;
pub mod screenshot;
pub mod ticks;

pub use arrow::{Arrow3D, ArrowStyle, ProjectedArrow};
pub use axes::{Axes3D, AxesStyle, MarkerStyle, Rect, TextStyle};
pub use canvas::{rgba, Canvas, HAlign, VAlign};
pub use error::{RenderError, RenderResult};
pub use figure::{Figure, SaveOptions};
pub use projection::{Projector, ScreenProjection, ViewTransform};
pub use screenshot::{crop_to_content, save_image};
