//! Plotting camera poses and exporting the default and top-down views.

use std::path::Path;
use std::rc::Rc;

use glam::Vec3;
use posecheck_core::{AxisLimits, CameraRecord, MarkerPath, PlotOptions, PosecheckError, Result};
use posecheck_render::{
    Arrow3D, ArrowStyle, AxesStyle, Figure, HAlign, MarkerStyle, SaveOptions,
    TextStyle, VAlign,
};

const TITLE_FONT_SIZE: f32 = 14.0;
const AXIS_LABEL_FONT_SIZE: f32 = 12.0;
const CAMERA_LABEL_FONT_SIZE: f32 = 8.0;

/// Unit viewing direction of a camera.
///
/// # Errors
/// Returns [`PosecheckError::DegenerateDirection`] if the direction has
/// zero (or non-finite) length.
pub fn normalized_direction(camera: &CameraRecord) -> Result<Vec3> {
    let direction = camera.direction();
    let length = direction.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return Err(PosecheckError::DegenerateDirection {
            camera_number: camera.camera_number(),
        });
    }
    Ok(direction / length)
}

/// Tip of the viewing-direction arrow.
#[must_use]
pub fn arrow_endpoint(position: Vec3, unit_direction: Vec3, arrow_length: f32) -> Vec3 {
    position + arrow_length * unit_direction
}

/// Where the camera number is drawn: behind the camera, against its view.
#[must_use]
pub fn label_anchor(position: Vec3, unit_direction: Vec3, offset: f32) -> Vec3 {
    position - offset * unit_direction
}

/// Builds the camera figure: markers, arrows, numbers and equal-aspect limits.
pub fn build_figure(cameras: &[CameraRecord], options: &PlotOptions) -> Result<Figure> {
    let positions: Vec<Vec3> = cameras.iter().map(CameraRecord::position).collect();
    let limits = AxisLimits::equal_aspect(&positions).ok_or(PosecheckError::EmptyScene)?;
    let style = &options.style;

    let mut fig = Figure::new(options.figure_size[0], options.figure_size[1]);
    fig.set_background(style.background);
    let axes = fig.axes_mut();
    axes.set_style(AxesStyle {
        pane: style.pane,
        grid: style.grid,
        text: style.text,
    });
    axes.set_projection(options.projection);

    let marker = Rc::new(MarkerPath::camera());
    let marker_style = MarkerStyle {
        size: options.marker_size,
        face: style.marker_face,
        edge: style.marker_edge,
        ..MarkerStyle::default()
    };
    let arrow_style = ArrowStyle {
        color: style.arrow,
        ..ArrowStyle::default()
    };
    let label_style = TextStyle {
        font_size: CAMERA_LABEL_FONT_SIZE,
        color: style.label,
        halign: HAlign::Center,
        ..TextStyle::default()
    };

    for camera in cameras {
        let position = camera.position();
        axes.scatter(position, &marker, marker_style);

        let direction = normalized_direction(camera)?;
        let end = arrow_endpoint(position, direction, options.arrow_length);
        axes.add_arrow(Arrow3D::new(position, end, arrow_style));

        let anchor = label_anchor(position, direction, options.label_offset);
        axes.text(anchor, camera.camera_number().to_string(), label_style);
    }

    axes.set_title(
        options.title.clone(),
        TextStyle {
            font_size: TITLE_FONT_SIZE,
            color: style.text,
            halign: HAlign::Center,
            valign: VAlign::Center,
            bold: true,
        },
    );
    axes.set_xlabel("X", AXIS_LABEL_FONT_SIZE);
    axes.set_ylabel("Y", AXIS_LABEL_FONT_SIZE);
    axes.set_zlabel("Z", AXIS_LABEL_FONT_SIZE);
    axes.set_limits(&limits);
    log::debug!(
        "axis limits centred on {:?} with half-range {}",
        limits.center,
        limits.half_range
    );

    Ok(fig)
}

/// Plots the cameras and saves the default view, then the top-down view.
///
/// Prints a confirmation line for each saved image, then tries to show the
/// figure interactively.
pub fn plot_and_save_cameras(
    cameras: &[CameraRecord],
    options: &PlotOptions,
    default_save_path: impl AsRef<Path>,
    top_view_save_path: impl AsRef<Path>,
) -> Result<()> {
    let (default_save_path, top_view_save_path) =
        (default_save_path.as_ref(), top_view_save_path.as_ref());
    let mut fig = build_figure(cameras, options)?;
    let save = SaveOptions {
        dpi: options.dpi,
        tight: options.tight_bbox,
    };

    fig.savefig(default_save_path, &save)?;
    println!("Default view saved to {}", default_save_path.display());

    let top = options.top_view;
    fig.axes_mut().view_init(top.elev, top.azim);
    fig.savefig(top_view_save_path, &save)?;
    println!("Top view saved to {}", top_view_save_path.display());

    fig.show();
    Ok(())
}
