//! Camera pose records derived from camera-to-world transforms.

use glam::{Mat4, Vec3};

/// A single camera pose read from a transforms file.
///
/// Position and viewing direction are derived from the transform once, at
/// construction, and cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRecord {
    position: Vec3,
    transform: Mat4,
    direction: Vec3,
    camera_number: i64,
}

impl CameraRecord {
    /// Builds a record from a camera-to-world transform.
    ///
    /// The translation column becomes the position. The viewing direction is
    /// the negated third column of the rotation block (cameras look down -Z).
    #[must_use]
    pub fn from_transform(transform: Mat4, camera_number: i64) -> Self {
        let position = transform.w_axis.truncate();
        let direction = -transform.z_axis.truncate();
        Self {
            position,
            transform,
            direction,
            camera_number,
        }
    }

    /// Builds a record from a row-major 4x4 matrix, as stored in transforms files.
    #[must_use]
    pub fn from_rows(rows: &[[f32; 4]; 4], camera_number: i64) -> Self {
        Self::from_transform(Mat4::from_cols_array_2d(rows).transpose(), camera_number)
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The full camera-to-world transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Viewing direction, not normalized.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Camera index parsed from the frame's file name.
    #[must_use]
    pub fn camera_number(&self) -> i64 {
        self.camera_number
    }
}
