//! Image export for rendered figures.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};

/// Saves an image, choosing the encoder from the file extension.
///
/// # Arguments
/// * `path` - Output path (supports .png, .jpg, .jpeg)
/// * `image` - RGBA pixels
///
/// # Errors
/// Returns an error if the file cannot be written or the format is unsupported.
pub fn save_image(path: impl AsRef<Path>, image: &RgbaImage) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let format = match extension.as_str() {
        "png" => ImageFormat::Png,
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        _ => return Err(RenderError::UnsupportedFormat(extension)),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel
        DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut writer, format)?;
    } else {
        image.write_to(&mut writer, format)?;
    }
    writer.flush()?;
    Ok(())
}

/// Crops an image to the pixels that differ from `background`, keeping `pad`
/// pixels of margin. An image with no content is returned unchanged.
#[must_use]
pub fn crop_to_content(image: &RgbaImage, background: Rgba<u8>, pad: u32) -> RgbaImage {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0, 0);
    let mut found = false;
    for (x, y, px) in image.enumerate_pixels() {
        if *px != background {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
            found = true;
        }
    }
    if !found {
        return image.clone();
    }

    let x0 = min.0.saturating_sub(pad);
    let y0 = min.1.saturating_sub(pad);
    let x1 = (max.0 + pad).min(image.width() - 1);
    let y1 = (max.1 + pad).min(image.height() - 1);
    image::imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
}
