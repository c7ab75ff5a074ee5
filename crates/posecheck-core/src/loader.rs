//! Loader for Nerfstudio-style `transforms.json` files.
//!
//! Only the `frames` list is read. Each frame must carry a 4x4
//! `transform_matrix` (row-major) and a `file_path` whose last `_`-separated
//! segment holds the camera number, e.g. `images/frame_00022.jpg` -> 22.
//! Any other keys (intrinsics, `camera_model`, ...) are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::camera::CameraRecord;
use crate::error::{PosecheckError, Result};

#[derive(Debug, Deserialize)]
struct TransformsFile {
    frames: Vec<FrameEntry>,
}

#[derive(Debug, Deserialize)]
struct FrameEntry {
    transform_matrix: [[f32; 4]; 4],
    file_path: String,
}

/// Loads all camera records from a transforms file, in file order.
pub fn load_camera_data(path: impl AsRef<Path>) -> Result<Vec<CameraRecord>> {
    let path = path.as_ref();
    log::debug!("loading camera data from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_camera_data(&contents)
}

/// Parses camera records from the contents of a transforms file.
pub fn parse_camera_data(json: &str) -> Result<Vec<CameraRecord>> {
    let file: TransformsFile =
        serde_json::from_str(json).map_err(|e| PosecheckError::FormatError(e.to_string()))?;

    let cameras = file
        .frames
        .iter()
        .map(|frame| {
            let camera_number = parse_camera_number(&frame.file_path)?;
            let record = CameraRecord::from_rows(&frame.transform_matrix, camera_number);
            log::trace!(
                "camera {camera_number}: position {:?}, direction {:?}",
                record.position(),
                record.direction()
            );
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("parsed {} frames", cameras.len());
    Ok(cameras)
}

/// Extracts the camera number from a frame file name.
///
/// Takes the text after the last `_`, cuts it at the first `.`, and parses
/// the rest as an integer.
pub fn parse_camera_number(file_path: &str) -> Result<i64> {
    let last = file_path.rsplit('_').next().unwrap_or(file_path);
    let stem = last.split('.').next().unwrap_or(last);
    stem.parse::<i64>()
        .map_err(|e| PosecheckError::InvalidFileName {
            file_path: file_path.to_string(),
            reason: format!("'{stem}': {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FRAMES: &str = r#"{
        "camera_model": "OPENCV",
        "fl_x": 1000.0,
        "frames": [
            {
                "file_path": "images/frame_00022.jpg",
                "transform_matrix": [
                    [1.0, 0.0, 0.0, 1.0],
                    [0.0, 1.0, 0.0, 2.0],
                    [0.0, 0.0, 1.0, 3.0],
                    [0.0, 0.0, 0.0, 1.0]
                ]
            },
            {
                "file_path": "images/frame_00007.jpg",
                "colmap_im_id": 7,
                "transform_matrix": [
                    [0.0, 0.0, 1.0, -1.0],
                    [0.0, 1.0, 0.0, 0.0],
                    [-1.0, 0.0, 0.0, 0.5],
                    [0.0, 0.0, 0.0, 1.0]
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_camera_number() {
        assert_eq!(parse_camera_number("frame_00022.jpg").unwrap(), 22);
        assert_eq!(parse_camera_number("foo_7.png").unwrap(), 7);
        assert_eq!(parse_camera_number("images/frame_00003.png").unwrap(), 3);
        assert_eq!(parse_camera_number("a_b_12").unwrap(), 12);
    }

    #[test]
    fn test_parse_camera_number_rejects_non_numeric_suffix() {
        for name in ["frame_abc.jpg", "frame_.jpg", "frame.jpg", ""] {
            let err = parse_camera_number(name).unwrap_err();
            assert!(err.is_format_error(), "{name}: {err}");
        }
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let cams = parse_camera_data(TWO_FRAMES).unwrap();
        assert_eq!(cams.len(), 2);
        assert_eq!(cams[0].camera_number(), 22);
        assert_eq!(cams[1].camera_number(), 7);
        assert_eq!(cams[0].position(), glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cams[1].direction(), glam::Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_missing_fields_are_format_errors() {
        let cases = [
            r#"{}"#,
            r#"{"frames": [{"file_path": "frame_1.png"}]}"#,
            r#"{"frames": [{"transform_matrix": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}]}"#,
            r#"{"frames": [{"file_path": "frame_1.png", "transform_matrix": [[1,0,0],[0,1,0],[0,0,1]]}]}"#,
            "not json",
        ];
        for case in cases {
            let err = parse_camera_data(case).unwrap_err();
            assert!(err.is_format_error(), "{case}: {err}");
        }
    }

    #[test]
    fn test_empty_frame_list() {
        let cams = parse_camera_data(r#"{"frames": []}"#).unwrap();
        assert!(cams.is_empty());
    }
}
