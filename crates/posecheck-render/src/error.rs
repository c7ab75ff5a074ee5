//! Rendering error types.

use posecheck_core::PosecheckError;
use thiserror::Error;

/// Errors that can occur while rendering or exporting a figure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to write the output file.
    #[error("failed to save image: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// The output extension is not a supported raster format.
    #[error("unsupported image format: '{0}'")]
    UnsupportedFormat(String),

    /// Figure size and resolution give an unusable pixel size.
    #[error("invalid figure dimensions: {width}x{height} pixels")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for PosecheckError {
    fn from(err: RenderError) -> Self {
        PosecheckError::RenderError(err.to_string())
    }
}
