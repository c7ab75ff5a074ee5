//! 3D axes: limits, view, artists and decorations.

#![allow(clippy::cast_precision_loss)]

use std::rc::Rc;

use glam::{Vec2, Vec3};
use posecheck_core::{AxisLimits, MarkerPath, ProjectionMode, ViewAngles};

use crate::arrow::Arrow3D;
use crate::canvas::{rgba, Canvas, HAlign, VAlign};
use crate::font;
use crate::projection::{Projector, ScreenProjection, ViewTransform};
use crate::ticks::{format_tick, nice_step, nice_ticks};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];
const TICK_TARGET: usize = 5;
const TICK_FONT_SIZE: f32 = 10.0;
const TICK_PAD_PT: f32 = 14.0;
const LABEL_PAD_PT: f32 = 34.0;
const GRID_WIDTH_PT: f32 = 0.8;
const TITLE_PAD_PT: f32 = 16.0;
/// Fraction of the axes height reserved for the title.
const TITLE_BAND: f32 = 0.08;
/// Room around the unit cube for tick and axis labels.
const CUBE_MARGIN: f32 = 1.4;

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scatter marker appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker area in points squared.
    pub size: f32,
    pub face: Vec3,
    pub edge: Vec3,
    /// Edge line width in points.
    pub edge_width: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 36.0,
            face: Vec3::ZERO,
            edge: Vec3::ONE,
            edge_width: 1.0,
        }
    }
}

/// Text appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f32,
    pub color: Vec3,
    pub halign: HAlign,
    pub valign: VAlign,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            color: Vec3::ZERO,
            halign: HAlign::Left,
            valign: VAlign::Baseline,
            bold: false,
        }
    }
}

/// Colors of the axes decorations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesStyle {
    pub pane: Vec3,
    pub grid: Vec3,
    pub text: Vec3,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            pane: Vec3::splat(0.898),
            grid: Vec3::ONE,
            text: Vec3::splat(0.3),
        }
    }
}

#[derive(Debug, Clone)]
struct Scatter {
    position: Vec3,
    marker: Rc<MarkerPath>,
    style: MarkerStyle,
}

#[derive(Debug, Clone)]
struct Text3D {
    position: Vec3,
    text: String,
    style: TextStyle,
}

#[derive(Debug, Clone)]
enum Artist {
    Scatter(Scatter),
    Arrow(Arrow3D),
    Text(Text3D),
}

/// A 3D plot area.
#[derive(Debug, Clone)]
pub struct Axes3D {
    limits: [(f32, f32); 3],
    view: ViewAngles,
    projection: ProjectionMode,
    title: Option<(String, TextStyle)>,
    labels: [Option<(String, f32)>; 3],
    style: AxesStyle,
    artists: Vec<Artist>,
}

impl Default for Axes3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes3D {
    /// Creates empty axes with unit limits and the default view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limits: [(0.0, 1.0); 3],
            view: ViewAngles::DEFAULT,
            projection: ProjectionMode::default(),
            title: None,
            labels: [None, None, None],
            style: AxesStyle::default(),
            artists: Vec::new(),
        }
    }

    pub fn set_xlim(&mut self, lo: f32, hi: f32) {
        self.set_lim(0, lo, hi);
    }

    pub fn set_ylim(&mut self, lo: f32, hi: f32) {
        self.set_lim(1, lo, hi);
    }

    pub fn set_zlim(&mut self, lo: f32, hi: f32) {
        self.set_lim(2, lo, hi);
    }

    /// Applies limits on all three axes.
    pub fn set_limits(&mut self, limits: &AxisLimits) {
        for axis in 0..3 {
            let (lo, hi) = limits.axis(axis);
            self.set_lim(axis, lo, hi);
        }
    }

    fn set_lim(&mut self, axis: usize, lo: f32, hi: f32) {
        let tolerance = f32::EPSILON * lo.abs().max(hi.abs()).max(1.0);
        self.limits[axis] = if (hi - lo).abs() <= tolerance {
            log::warn!(
                "{} axis limits are singular ({lo}, {hi}); expanding to +/-0.5",
                AXIS_NAMES[axis]
            );
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
    }

    /// Limits of axis `axis` (0 = X, 1 = Y, 2 = Z).
    #[must_use]
    pub fn limits(&self, axis: usize) -> (f32, f32) {
        self.limits[axis]
    }

    /// Sets the viewing angles in degrees.
    pub fn view_init(&mut self, elev: f32, azim: f32) {
        self.view = ViewAngles { elev, azim };
    }

    #[must_use]
    pub fn view(&self) -> ViewAngles {
        self.view
    }

    pub fn set_projection(&mut self, mode: ProjectionMode) {
        self.projection = mode;
    }

    pub fn set_style(&mut self, style: AxesStyle) {
        self.style = style;
    }

    pub fn set_title(&mut self, text: impl Into<String>, style: TextStyle) {
        self.title = Some((text.into(), style));
    }

    pub fn set_xlabel(&mut self, text: impl Into<String>, font_size: f32) {
        self.labels[0] = Some((text.into(), font_size));
    }

    pub fn set_ylabel(&mut self, text: impl Into<String>, font_size: f32) {
        self.labels[1] = Some((text.into(), font_size));
    }

    pub fn set_zlabel(&mut self, text: impl Into<String>, font_size: f32) {
        self.labels[2] = Some((text.into(), font_size));
    }

    /// Adds a marker at a point. The marker path is shared, not copied.
    pub fn scatter(&mut self, position: Vec3, marker: &Rc<MarkerPath>, style: MarkerStyle) {
        self.artists.push(Artist::Scatter(Scatter {
            position,
            marker: Rc::clone(marker),
            style,
        }));
    }

    pub fn add_arrow(&mut self, arrow: Arrow3D) {
        self.artists.push(Artist::Arrow(arrow));
    }

    /// Adds text anchored at a point.
    pub fn text(&mut self, position: Vec3, text: impl Into<String>, style: TextStyle) {
        self.artists.push(Artist::Text(Text3D {
            position,
            text: text.into(),
            style,
        }));
    }

    /// Number of artists added so far.
    #[must_use]
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// The projection used when drawing into `rect`.
    #[must_use]
    pub fn projection_for(&self, rect: Rect) -> ScreenProjection {
        let title_band = if self.title.is_some() {
            rect.height * TITLE_BAND
        } else {
            0.0
        };
        let height = rect.height - title_band;
        let origin = Vec2::new(
            rect.x + rect.width * 0.5,
            rect.y + title_band + height * 0.5,
        );
        let scale = rect.width.min(height) * 0.5 / CUBE_MARGIN;
        let lo = Vec3::new(self.limits[0].0, self.limits[1].0, self.limits[2].0);
        let hi = Vec3::new(self.limits[0].1, self.limits[1].1, self.limits[2].1);
        ScreenProjection::new(
            ViewTransform::new(self.view, self.projection),
            lo,
            hi - lo,
            origin,
            scale,
        )
    }

    /// Draws the axes and all artists into `rect`.
    pub fn draw(&self, canvas: &mut Canvas, rect: Rect, px_per_pt: f32) {
        let proj = self.projection_for(rect);
        let back = back_planes(proj.view().eye());

        self.draw_panes(canvas, &proj, back, px_per_pt);
        self.draw_tick_labels(canvas, &proj, back, px_per_pt);

        // Markers and arrows, far to near. Anything in front of the near
        // plane is dropped; arrows crossing it are clipped when drawn.
        let visible = |depth: f32| proj.near_depth().map_or(true, |near| depth >= near);
        let mut items: Vec<(f32, &Artist)> = self
            .artists
            .iter()
            .filter_map(|artist| match artist {
                Artist::Scatter(s) => {
                    let depth = proj.project(s.position).z;
                    visible(depth).then_some((depth, artist))
                }
                Artist::Arrow(a) => a.project(&proj).map(|p| (p.depth, artist)),
                Artist::Text(_) => None,
            })
            .collect();
        items.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (_, artist) in items {
            match artist {
                Artist::Scatter(s) => draw_scatter(canvas, &proj, s, px_per_pt),
                Artist::Arrow(a) => a.draw(canvas, &proj, px_per_pt),
                Artist::Text(_) => {}
            }
        }

        for artist in &self.artists {
            if let Artist::Text(t) = artist {
                if visible(proj.project(t.position).z) {
                    draw_text(canvas, proj.project_2d(t.position), &t.text, &t.style, px_per_pt);
                }
            }
        }

        if let Some((title, style)) = &self.title {
            let anchor = self.title_anchor(&proj, rect, style, px_per_pt);
            draw_text(canvas, anchor, title, style, px_per_pt);
        }
    }

    fn normalized_ticks(&self, axis: usize) -> Vec<(f32, f32)> {
        let (lo, hi) = self.limits[axis];
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let span = self.limits[axis].1 - self.limits[axis].0;
        nice_ticks(lo, hi, TICK_TARGET)
            .into_iter()
            .map(|t| (t, (t - self.limits[axis].0) / span - 0.5))
            .collect()
    }

    fn draw_panes(&self, canvas: &mut Canvas, proj: &ScreenProjection, back: [f32; 3], px_per_pt: f32) {
        let pane = rgba(self.style.pane);
        let grid = rgba(self.style.grid);
        let grid_width = GRID_WIDTH_PT * px_per_pt;

        for k in 0..3 {
            let (i, j) = ((k + 1) % 3, (k + 2) % 3);
            let corners: Vec<Vec2> = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)]
                .iter()
                .map(|&(a, b)| proj.project_normalized(cube_point(k, back[k], i, a, j, b)).truncate())
                .collect();
            canvas.fill_polygon(&corners, pane);

            for (along, across) in [(i, j), (j, i)] {
                for (_, t) in self.normalized_ticks(along) {
                    let a = proj.project_normalized(cube_point(k, back[k], along, t, across, -0.5));
                    let b = proj.project_normalized(cube_point(k, back[k], along, t, across, 0.5));
                    canvas.draw_line(a.truncate(), b.truncate(), grid_width, grid);
                }
            }
        }
    }

    fn draw_tick_labels(
        &self,
        canvas: &mut Canvas,
        proj: &ScreenProjection,
        back: [f32; 3],
        px_per_pt: f32,
    ) {
        let min_extent = 0.1 * (canvas.width().min(canvas.height()) as f32) / CUBE_MARGIN;
        for label in self.layout_tick_labels(proj, back, min_extent, px_per_pt) {
            draw_text(canvas, label.anchor, &label.text, &label.style, px_per_pt);
        }
    }

    /// Places tick and axis labels along the cube edges. A tick label that
    /// would overlap one already placed is left out.
    fn layout_tick_labels(
        &self,
        proj: &ScreenProjection,
        back: [f32; 3],
        min_extent: f32,
        px_per_pt: f32,
    ) -> Vec<Label> {
        let centre = proj.project_normalized(Vec3::ZERO).truncate();
        let mut boxes = LabelBoxes::default();
        let mut labels = Vec::new();

        for axis in 0..3 {
            let mut unit = Vec3::ZERO;
            unit[axis] = 0.5;
            let extent = (proj.project_normalized(unit) - proj.project_normalized(-unit))
                .truncate()
                .length();
            // Axes seen end-on (e.g. Z from straight above) get no labels.
            if extent < min_extent {
                continue;
            }

            let edge = label_edge(axis, back);
            let towards_edge = proj.project_normalized(edge).truncate() - centre;
            let outward = if towards_edge.length_squared() > 1e-6 {
                towards_edge.normalize()
            } else {
                Vec2::Y
            };

            let tick_style = TextStyle {
                font_size: TICK_FONT_SIZE,
                color: self.style.text,
                halign: HAlign::Center,
                valign: VAlign::Center,
                bold: false,
            };
            let (lo, hi) = self.limits[axis];
            let step = nice_step(lo.min(hi), lo.max(hi), TICK_TARGET);
            for (value, t) in self.normalized_ticks(axis) {
                let mut p = edge;
                p[axis] = t;
                let label = Label {
                    anchor: proj.project_normalized(p).truncate() + outward * TICK_PAD_PT * px_per_pt,
                    text: format_tick(value, step),
                    style: tick_style,
                };
                if boxes.try_place(label.bounds(px_per_pt)) {
                    labels.push(label);
                }
            }

            if let Some((text, font_size)) = &self.labels[axis] {
                let label = Label {
                    anchor: proj.project_normalized(edge).truncate() + outward * LABEL_PAD_PT * px_per_pt,
                    text: text.clone(),
                    style: TextStyle {
                        font_size: *font_size,
                        ..tick_style
                    },
                };
                boxes.try_place(label.bounds(px_per_pt));
                labels.push(label);
            }
        }
        labels
    }

    /// Centre of the title: a fixed gap above the projected cube, but never
    /// above the top of `rect`.
    fn title_anchor(&self, proj: &ScreenProjection, rect: Rect, style: &TextStyle, px_per_pt: f32) -> Vec2 {
        let cube_top = (0..8)
            .map(|i| {
                let corner = Vec3::new(
                    if i & 1 == 0 { -0.5 } else { 0.5 },
                    if i & 2 == 0 { -0.5 } else { 0.5 },
                    if i & 4 == 0 { -0.5 } else { 0.5 },
                );
                proj.project_normalized(corner).y
            })
            .fold(f32::INFINITY, f32::min);
        let (_, height) = font::text_size("X", font::scale_for(style.font_size, px_per_pt));
        let half_height = height as f32 * 0.5;
        let y = (cube_top - TITLE_PAD_PT * px_per_pt - half_height).max(rect.y + half_height);
        Vec2::new(rect.x + rect.width * 0.5, y)
    }
}

/// A label laid out in pixels.
#[derive(Debug, Clone)]
struct Label {
    anchor: Vec2,
    text: String,
    style: TextStyle,
}

impl Label {
    /// Pixel box (min, max) of a centre-aligned label.
    fn bounds(&self, px_per_pt: f32) -> (Vec2, Vec2) {
        let scale = font::scale_for(self.style.font_size, px_per_pt);
        let (w, h) = font::text_size(&self.text, scale);
        let half = Vec2::new(w as f32, h as f32) * 0.5;
        (self.anchor - half, self.anchor + half)
    }
}

/// Boxes of the labels placed so far.
#[derive(Debug, Default)]
struct LabelBoxes(Vec<(Vec2, Vec2)>);

impl LabelBoxes {
    /// Records `bounds` unless it overlaps a recorded box.
    fn try_place(&mut self, (min, max): (Vec2, Vec2)) -> bool {
        let overlaps = self
            .0
            .iter()
            .any(|(lo, hi)| min.x < hi.x && lo.x < max.x && min.y < hi.y && lo.y < max.y);
        if !overlaps {
            self.0.push((min, max));
        }
        !overlaps
    }
}

/// Normalized coordinate of the far pane for each axis.
fn back_planes(eye: Vec3) -> [f32; 3] {
    // Components near zero (edge-on panes) count as the negative side, which
    // puts top-view labels at the bottom and left.
    [eye.x, eye.y, eye.z].map(|e| if e > 1e-3 { -0.5 } else { 0.5 })
}

/// Midpoint of the cube edge that carries the tick labels of `axis`.
fn label_edge(axis: usize, back: [f32; 3]) -> Vec3 {
    match axis {
        0 => Vec3::new(0.0, -back[1], back[2]),
        1 => Vec3::new(-back[0], 0.0, back[2]),
        _ => Vec3::new(-back[0], back[1], 0.0),
    }
}

fn cube_point(k: usize, ck: f32, i: usize, ci: f32, j: usize, cj: f32) -> Vec3 {
    let mut p = Vec3::ZERO;
    p[k] = ck;
    p[i] = ci;
    p[j] = cj;
    p
}

fn draw_scatter(canvas: &mut Canvas, proj: &ScreenProjection, s: &Scatter, px_per_pt: f32) {
    let centre = proj.project_2d(s.position);
    if !centre.is_finite() {
        return;
    }
    let side = s.style.size.max(0.0).sqrt() * px_per_pt;
    let face = rgba(s.style.face);
    let edge = rgba(s.style.edge);
    for ring in s.marker.normalized().polygons() {
        // Marker space is y-up; the canvas is y-down.
        let points: Vec<Vec2> = ring
            .iter()
            .map(|v| centre + Vec2::new(v.x, -v.y) * side)
            .collect();
        canvas.fill_polygon(&points, face);
        canvas.stroke_polyline(&points, true, s.style.edge_width * px_per_pt, edge);
    }
}

fn draw_text(canvas: &mut Canvas, anchor: Vec2, text: &str, style: &TextStyle, px_per_pt: f32) {
    if !anchor.is_finite() {
        return;
    }
    canvas.draw_text(
        anchor,
        text,
        font::scale_for(style.font_size, px_per_pt),
        rgba(style.color),
        style.halign,
        style.valign,
        style.bold,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_limits_are_widened() {
        let mut axes = Axes3D::new();
        axes.set_xlim(2.0, 2.0);
        assert_eq!(axes.limits(0), (1.5, 2.5));
        axes.set_ylim(-1.0, 3.0);
        assert_eq!(axes.limits(1), (-1.0, 3.0));
    }

    #[test]
    fn test_set_limits_from_axis_limits() {
        let limits = AxisLimits::equal_aspect(&[Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0)]).unwrap();
        let mut axes = Axes3D::new();
        axes.set_limits(&limits);
        assert_eq!(axes.limits(0), (0.0, 4.0));
        assert_eq!(axes.limits(1), (-1.0, 3.0));
        assert_eq!(axes.limits(2), (-1.5, 2.5));
    }

    #[test]
    fn test_artists_are_recorded() {
        let marker = Rc::new(MarkerPath::camera());
        let mut axes = Axes3D::new();
        axes.scatter(Vec3::ZERO, &marker, MarkerStyle::default());
        axes.add_arrow(Arrow3D::new(Vec3::ZERO, Vec3::X, crate::ArrowStyle::default()));
        axes.text(Vec3::ONE, "3", TextStyle::default());
        assert_eq!(axes.artist_count(), 3);
        assert_eq!(Rc::strong_count(&marker), 2);
    }

    #[test]
    fn test_back_planes() {
        let eye = ViewTransform::new(ViewAngles::DEFAULT, ProjectionMode::Perspective).eye();
        // Default view looks from +x, -y, +z.
        assert_eq!(back_planes(eye), [-0.5, 0.5, -0.5]);
        let top = ViewTransform::new(ViewAngles::TOP, ProjectionMode::Perspective).eye();
        assert_eq!(back_planes(top), [0.5, 0.5, -0.5]);
    }

    #[test]
    fn test_draw_marks_canvas() {
        let marker = Rc::new(MarkerPath::camera());
        let mut axes = Axes3D::new();
        axes.set_limits(&AxisLimits::equal_aspect(&[Vec3::ZERO, Vec3::ONE]).unwrap());
        axes.scatter(Vec3::splat(0.5), &marker, MarkerStyle { size: 400.0, ..MarkerStyle::default() });

        let mut canvas = Canvas::new(200, 200, image::Rgba([255, 255, 255, 255]));
        let rect = Rect { x: 0.0, y: 0.0, width: 200.0, height: 200.0 };
        axes.draw(&mut canvas, rect, 1.0);

        // The marker is black and sits at the cube centre.
        let centre = axes.projection_for(rect).project_2d(Vec3::splat(0.5));
        let px = canvas.pixel(centre.x as u32, centre.y as u32);
        assert_eq!(px, Some(image::Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_label_boxes_reject_overlap() {
        let mut boxes = LabelBoxes::default();
        assert!(boxes.try_place((Vec2::ZERO, Vec2::new(10.0, 5.0))));
        assert!(!boxes.try_place((Vec2::new(8.0, 3.0), Vec2::new(20.0, 8.0))));
        // Touching edges do not count as overlap.
        assert!(boxes.try_place((Vec2::new(10.0, 0.0), Vec2::new(20.0, 5.0))));
    }

    #[test]
    fn test_corner_tick_labels_do_not_collide() {
        // A 0.2-unit scene, where the X and Y ticks meet at the front corner.
        let mut axes = Axes3D::new();
        axes.set_limits(&AxisLimits::equal_aspect(&[Vec3::ZERO, Vec3::new(0.2, 0.1, 0.05)]).unwrap());
        let rect = Rect { x: 0.0, y: 0.0, width: 720.0, height: 576.0 };
        let proj = axes.projection_for(rect);
        let back = back_planes(proj.view().eye());
        let px_per_pt = 1.0;
        let labels = axes.layout_tick_labels(&proj, back, 0.0, px_per_pt);

        let ticks: Vec<&Label> = labels
            .iter()
            .filter(|l| (l.style.font_size - TICK_FONT_SIZE).abs() < f32::EPSILON)
            .collect();
        assert!(ticks.len() > 6);
        let bounds: Vec<_> = ticks.iter().map(|l| l.bounds(px_per_pt)).collect();
        for (i, (a_min, a_max)) in bounds.iter().enumerate() {
            for (b_min, b_max) in &bounds[i + 1..] {
                let overlap = a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y;
                assert!(!overlap, "{a_min:?}..{a_max:?} overlaps {b_min:?}..{b_max:?}");
            }
        }
    }

    #[test]
    fn test_title_sits_just_above_cube() {
        let mut axes = Axes3D::new();
        let style = TextStyle {
            font_size: 14.0,
            valign: VAlign::Center,
            ..TextStyle::default()
        };
        axes.set_title("Cameras", style);
        let rect = Rect { x: 0.0, y: 0.0, width: 720.0, height: 576.0 };
        let proj = axes.projection_for(rect);
        let cube_top = [Vec3::new(-0.5, 0.5, 0.5), Vec3::new(0.5, -0.5, 0.5), Vec3::splat(0.5), Vec3::new(-0.5, -0.5, 0.5)]
            .iter()
            .map(|c| proj.project_normalized(*c).y)
            .fold(f32::INFINITY, f32::min);

        let anchor = axes.title_anchor(&proj, rect, &style, 1.0);
        assert!((anchor.x - 360.0).abs() < 1e-3);
        assert!(anchor.y < cube_top);
        assert!(cube_top - anchor.y < TITLE_PAD_PT + 14.0);
        assert!(anchor.y > 0.0);
    }
}
