//! Error types for posecheck-rs.

use thiserror::Error;

/// The main error type for posecheck-rs operations.
#[derive(Error, Debug)]
pub enum PosecheckError {
    /// The transforms file does not have the expected structure.
    #[error("format error: {0}")]
    FormatError(String),

    /// A frame's file name does not end in `_<number>.<ext>`.
    #[error("format error: cannot read camera number from '{file_path}': {reason}")]
    InvalidFileName { file_path: String, reason: String },

    /// A camera's viewing direction has zero length and cannot be normalized.
    #[error("degenerate geometry: camera {camera_number} has a zero-length viewing direction")]
    DegenerateDirection { camera_number: i64 },

    /// Nothing to plot.
    #[error("no cameras to plot")]
    EmptyScene,

    /// Rendering or image export error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error outside the transforms file (e.g. a plot options file).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PosecheckError {
    /// Returns true for malformed input, including unreadable camera numbers.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::FormatError(_) | Self::InvalidFileName { .. })
    }
}

/// A specialized Result type for posecheck-rs operations.
pub type Result<T> = std::result::Result<T, PosecheckError>;
