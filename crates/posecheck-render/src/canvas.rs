//! CPU raster canvas with the primitives needed by the plot.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

use glam::{Vec2, Vec3};
use image::{Rgba, RgbaImage};

use crate::font;

/// Converts an RGB color in [0, 1] to an opaque pixel.
#[must_use]
pub fn rgba(color: Vec3) -> Rgba<u8> {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, 255])
}

/// Horizontal text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Anchor sits on the bottom of the glyphs.
    #[default]
    Baseline,
    Center,
    Top,
}

/// A pixel canvas. Coordinates are in pixels, origin top-left, y down.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Creates a canvas filled with the background color.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the pixel at (x, y), or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    /// Consumes the canvas and returns the image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn fill_span(&mut self, y: i64, x0: i64, x1: i64, color: Rgba<u8>) {
        if y < 0 || y >= i64::from(self.height()) {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(i64::from(self.width()) - 1);
        for x in x0..=x1 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fills a polygon using the even-odd rule, sampling at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        let y_start = (min.y - 0.5).ceil().max(0.0) as i64;
        let y_end = (max.y - 0.5).floor().min(self.height() as f32 - 1.0) as i64;

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            let sample_y = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sample_y && b.y > sample_y) || (b.y <= sample_y && a.y > sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i64;
                let x1 = (pair[1] - 0.5).floor() as i64;
                if x1 >= x0 {
                    self.fill_span(y, x0, x1, color);
                }
            }
        }
    }

    /// Fills a disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba<u8>) {
        let r = radius.max(0.5);
        let y0 = (center.y - r).floor() as i64;
        let y1 = (center.y + r).ceil() as i64;
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            let half = r * r - dy * dy;
            if half < 0.0 {
                continue;
            }
            let half = half.sqrt();
            let x0 = (center.x - half - 0.5).ceil() as i64;
            let x1 = (center.x + half - 0.5).floor() as i64;
            if x1 >= x0 {
                self.fill_span(y, x0, x1, color);
            }
        }
    }

    /// Draws a straight line of the given width in pixels.
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba<u8>) {
        let d = b - a;
        let len = d.length();
        if len < 1e-3 {
            self.fill_circle(a, width * 0.5, color);
            return;
        }
        let half = width.max(1.0) * 0.5;
        let n = Vec2::new(-d.y, d.x) / len * half;
        self.fill_polygon(&[a + n, b + n, b - n, a - n], color);
    }

    /// Strokes a polyline, with round joins.
    pub fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Rgba<u8>) {
        if points.len() < 2 {
            return;
        }
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], width, color);
        }
        if closed {
            self.draw_line(points[points.len() - 1], points[0], width, color);
        }
        if width > 1.5 {
            for p in points {
                self.fill_circle(*p, width * 0.5, color);
            }
        }
    }

    /// Draws text with the built-in bitmap font.
    ///
    /// `scale` is the pixel size of one font cell.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        anchor: Vec2,
        text: &str,
        scale: u32,
        color: Rgba<u8>,
        halign: HAlign,
        valign: VAlign,
        bold: bool,
    ) {
        let (w, h) = font::text_size(text, scale);
        let left = match halign {
            HAlign::Left => anchor.x,
            HAlign::Center => anchor.x - w as f32 * 0.5,
            HAlign::Right => anchor.x - w as f32,
        };
        let top = match valign {
            VAlign::Baseline => anchor.y - h as f32,
            VAlign::Center => anchor.y - h as f32 * 0.5,
            VAlign::Top => anchor.y,
        };
        let (left, top) = (left.round() as i64, top.round() as i64);
        let scale = i64::from(scale);
        let advance = i64::from(font::ADVANCE) * scale;
        let weight = if bold { scale.max(2) / 2 + 1 } else { 1 };

        for (i, c) in text.chars().enumerate() {
            let origin_x = left + i as i64 * advance;
            for (row, bits) in font::glyph(c).iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let x = origin_x + i64::from(col) * scale;
                    let y = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale + weight - 1 {
                            self.put(x + dx, y + dy, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn count(canvas: &Canvas, color: Rgba<u8>) -> usize {
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(Vec3::new(1.0, 0.0, 0.0)), Rgba([255, 0, 0, 255]));
        assert_eq!(rgba(Vec3::splat(2.0)), WHITE);
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        let square = [
            Vec2::new(2.0, 2.0),
            Vec2::new(6.0, 2.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(2.0, 6.0),
        ];
        canvas.fill_polygon(&square, BLACK);
        assert_eq!(count(&canvas, BLACK), 16);
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.pixel(6, 6), Some(WHITE));
    }

    #[test]
    fn test_fill_polygon_clips_to_canvas() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        let big = [
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ];
        canvas.fill_polygon(&big, BLACK);
        assert_eq!(count(&canvas, BLACK), 16);
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.draw_line(Vec2::new(1.0, 5.0), Vec2::new(9.0, 5.0), 2.0, BLACK);
        assert_eq!(canvas.pixel(5, 4), Some(BLACK));
        assert_eq!(canvas.pixel(5, 5), Some(BLACK));
        assert_eq!(canvas.pixel(5, 7), Some(WHITE));
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut canvas = Canvas::new(40, 20, WHITE);
        canvas.draw_text(
            Vec2::new(20.0, 10.0),
            "1",
            1,
            BLACK,
            HAlign::Center,
            VAlign::Center,
            false,
        );
        assert!(count(&canvas, BLACK) > 0);
        let mut blank = Canvas::new(40, 20, WHITE);
        blank.draw_text(Vec2::new(20.0, 10.0), " ", 2, BLACK, HAlign::Left, VAlign::Top, true);
        assert_eq!(count(&blank, BLACK), 0);
    }
}
