//! Figures: the rendering context owning one set of 3D axes.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::path::Path;

use glam::{Vec2, Vec3};
use image::RgbaImage;

use crate::axes::{Axes3D, Rect};
use crate::canvas::{rgba, Canvas};
use crate::error::{RenderError, RenderResult};
use crate::screenshot::{crop_to_content, save_image};

/// Largest accepted image side, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Options for saving a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Output resolution.
    pub dpi: u32,
    /// Crop to content, keeping a 0.1 inch margin.
    pub tight: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dpi: 100,
            tight: false,
        }
    }
}

/// A figure of a given physical size holding one 3D axes.
#[derive(Debug, Clone)]
pub struct Figure {
    size_inches: Vec2,
    background: Vec3,
    axes: Axes3D,
}

impl Figure {
    /// Creates a figure with a white background.
    #[must_use]
    pub fn new(width_inches: f32, height_inches: f32) -> Self {
        Self {
            size_inches: Vec2::new(width_inches, height_inches),
            background: Vec3::ONE,
            axes: Axes3D::new(),
        }
    }

    pub fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }

    #[must_use]
    pub fn axes(&self) -> &Axes3D {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes3D {
        &mut self.axes
    }

    /// Pixel size at the given resolution.
    #[must_use]
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let px = (self.size_inches * dpi as f32).round().max(Vec2::ZERO);
        (px.x as u32, px.y as u32)
    }

    /// Renders the figure to an RGBA image.
    pub fn render(&self, dpi: u32) -> RenderResult<RgbaImage> {
        let (width, height) = self.pixel_size(dpi);
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        log::debug!(
            "rendering {width}x{height} figure ({} artists, view {:?})",
            self.axes.artist_count(),
            self.axes.view()
        );

        let px_per_pt = dpi as f32 / 72.0;
        let mut canvas = Canvas::new(width, height, rgba(self.background));
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        };
        self.axes.draw(&mut canvas, rect, px_per_pt);
        Ok(canvas.into_image())
    }

    /// Renders the figure and writes it to `path`.
    pub fn savefig(&self, path: impl AsRef<Path>, options: &SaveOptions) -> RenderResult<()> {
        let path = path.as_ref();
        let mut image = self.render(options.dpi)?;
        if options.tight {
            let pad = (0.1 * options.dpi as f32).round() as u32;
            image = crop_to_content(&image, rgba(self.background), pad);
        }
        save_image(path, &image)?;
        log::info!(
            "saved {} ({}x{} px)",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(())
    }

    /// Displays the figure interactively, if a display backend is available.
    ///
    /// No interactive backend is built in, so this only logs; it never fails.
    pub fn show(&self) {
        log::info!("no interactive display available; figure was only written to disk");
    }
}
