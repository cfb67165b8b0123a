use posevis_core::PointCoordinates;

use crate::{
    canvas::{Canvas, Pixel, BLACK, GRID},
    figure_cfg::FigureStyle,
    glyphs::{Align, GlyphText},
};

const MARGIN: f64 = 0.05;
const TARGET_TICKS: f64 = 6.0;

/// Screen rectangle of a panel, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    /// Rectangle from fractions of a figure of the given size.
    pub fn fraction(figure: (u32, u32), left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let (w, h) = (figure.0 as f32, figure.1 as f32);
        Self {
            left: left * w,
            top: top * h,
            width: (right - left) * w,
            height: (bottom - top) * h,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Pixel {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl AxisLimits {
    /// Bounds of `values`, widened around a single value and padded by 5%.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for value in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return Self { min: -0.5, max: 0.5 };
        }
        if max - min < 1e-12 {
            return Self {
                min: min - 0.5,
                max: max + 0.5,
            };
        }
        let pad = (max - min) * MARGIN;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn with_span(&self, span: f64) -> Self {
        let mid = self.mid();
        Self {
            min: mid - span / 2.0,
            max: mid + span / 2.0,
        }
    }

    /// Evenly spaced round values inside the limits, and the decimals needed
    /// to print them.
    pub fn ticks(&self) -> (Vec<f64>, usize) {
        let raw = self.span() / TARGET_TICKS;
        if !(raw.is_finite() && raw > 0.0) {
            return (Vec::new(), 0);
        }
        let magnitude = 10f64.powf(raw.log10().floor());
        let step = [1.0, 2.0, 2.5, 5.0, 10.0]
            .iter()
            .map(|m| m * magnitude)
            .find(|step| *step >= raw * (1.0 - 1e-9))
            .unwrap_or(10.0 * magnitude);

        let first = (self.min / step - 1e-9).ceil() as i64;
        let last = (self.max / step + 1e-9).floor() as i64;
        let ticks = (first..=last)
            .map(|k| {
                let value = k as f64 * step;
                if value.abs() < step * 1e-9 {
                    0.0
                } else {
                    value
                }
            })
            .collect();
        (ticks, decimals_for(step))
    }
}

fn decimals_for(step: f64) -> usize {
    (0..10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
        })
        .unwrap_or(10)
}

pub fn format_tick(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_owned()
    } else {
        text
    }
}

/// Axis labels drawn next to a 2D panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct AxisNames<'a> {
    pub x: Option<&'a str>,
    pub y: Option<&'a str>,
}

/// Cartesian panel mapping data coordinates onto a screen rectangle.
#[derive(Clone, Debug)]
pub struct Panel2d {
    pub rect: PixelRect,
    pub x: AxisLimits,
    pub y: AxisLimits,
}

impl Panel2d {
    /// Fits the limits to `points`. With `equal_aspect` one data unit spans
    /// the same number of pixels on both axes; the shorter axis is widened.
    pub fn fit(rect: PixelRect, points: &[(f64, f64)], equal_aspect: bool) -> Self {
        let mut x = AxisLimits::fit(points.iter().map(|p| p.0));
        let mut y = AxisLimits::fit(points.iter().map(|p| p.1));
        if equal_aspect {
            let scale = (rect.width as f64 / x.span()).min(rect.height as f64 / y.span());
            x = x.with_span(rect.width as f64 / scale);
            y = y.with_span(rect.height as f64 / scale);
        }
        log::debug!("panel limits x {x:?}, y {y:?}");
        Self { rect, x, y }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> Pixel {
        let u = (x - self.x.min) / self.x.span();
        let v = (y - self.y.min) / self.y.span();
        (
            self.rect.left + (u as f32) * self.rect.width,
            self.rect.bottom() - (v as f32) * self.rect.height,
        )
    }

    /// Pixels per data unit along x and y.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.rect.width as f64 / self.x.span(),
            self.rect.height as f64 / self.y.span(),
        )
    }

    /// Grid, border, ticks and axis names.
    pub fn draw_axes(&self, canvas: &mut Canvas, style: &FigureStyle, names: AxisNames<'_>) {
        let rect = self.rect;
        let grid_width = style.points(0.8).max(1.0);
        let text = GlyphText::new(style.tick_label_height);
        let gap = style.tick_length + style.points(3.5);

        let (x_ticks, x_decimals) = self.x.ticks();
        for &tick in &x_ticks {
            let (px, _) = self.to_pixel(tick, self.y.min);
            canvas.line((px, rect.top), (px, rect.bottom()), grid_width, GRID);
            canvas.line(
                (px, rect.bottom()),
                (px, rect.bottom() + style.tick_length),
                grid_width,
                BLACK,
            );
            text.draw_aligned(
                canvas,
                &format_tick(tick, x_decimals),
                (px, rect.bottom() + gap),
                Align::Center,
                Align::Start,
                BLACK,
            );
        }

        let (y_ticks, y_decimals) = self.y.ticks();
        let mut widest = 0.0f32;
        for &tick in &y_ticks {
            let (_, py) = self.to_pixel(self.x.min, tick);
            canvas.line((rect.left, py), (rect.right(), py), grid_width, GRID);
            canvas.line(
                (rect.left - style.tick_length, py),
                (rect.left, py),
                grid_width,
                BLACK,
            );
            let label = format_tick(tick, y_decimals);
            widest = widest.max(text.width(&label));
            text.draw_aligned(
                canvas,
                &label,
                (rect.left - gap, py),
                Align::End,
                Align::Center,
                BLACK,
            );
        }

        canvas.rect_outline(
            (rect.left, rect.top),
            (rect.right(), rect.bottom()),
            grid_width,
            BLACK,
        );

        if let Some(name) = names.x {
            text.draw_aligned(
                canvas,
                name,
                (rect.center().0, rect.bottom() + gap * 2.0 + text.height),
                Align::Center,
                Align::Start,
                BLACK,
            );
        }
        if let Some(name) = names.y {
            text.draw_aligned(
                canvas,
                name,
                (rect.left - gap * 2.0 - widest, rect.center().1),
                Align::End,
                Align::Center,
                BLACK,
            );
        }
    }
}

/// Orthographic view of a 3D bounding box, each axis normalised to the box
/// as an auto-scaled 3D axes would.
#[derive(Clone, Debug)]
pub struct Panel3d {
    pub rect: PixelRect,
    pub limits: [AxisLimits; 3],
    right: [f64; 3],
    up: [f64; 3],
    scale: f64,
}

impl Panel3d {
    pub fn fit(
        rect: PixelRect,
        points: &[PointCoordinates],
        elevation_deg: f64,
        azimuth_deg: f64,
    ) -> Self {
        let limits = [0usize, 1, 2].map(|axis| AxisLimits::fit(points.iter().map(|p| p[axis])));
        let (el, az) = (elevation_deg.to_radians(), azimuth_deg.to_radians());
        let right = [-az.sin(), az.cos(), 0.0];
        let up = [-el.sin() * az.cos(), -el.sin() * az.sin(), el.cos()];

        let mut panel = Self {
            rect,
            limits,
            right,
            up,
            scale: 1.0,
        };
        let (mut extent_x, mut extent_y) = (0.0f64, 0.0f64);
        for corner in panel.corners() {
            let (sx, sy) = panel.screen(&corner);
            extent_x = extent_x.max(sx.abs());
            extent_y = extent_y.max(sy.abs());
        }
        let scale_x = rect.width as f64 / (2.0 * extent_x);
        let scale_y = rect.height as f64 / (2.0 * extent_y);
        panel.scale = scale_x.min(scale_y);
        panel
    }

    fn normalized(&self, point: &PointCoordinates) -> [f64; 3] {
        [0usize, 1, 2].map(|axis| {
            let limits = self.limits[axis];
            (point[axis] - limits.min) / limits.span() - 0.5
        })
    }

    fn screen(&self, point: &PointCoordinates) -> (f64, f64) {
        let n = self.normalized(point);
        let dot = |v: [f64; 3]| n[0] * v[0] + n[1] * v[1] + n[2] * v[2];
        (dot(self.right), dot(self.up))
    }

    pub fn project(&self, point: &PointCoordinates) -> Pixel {
        let (sx, sy) = self.screen(point);
        let (cx, cy) = self.rect.center();
        (
            cx + (sx * self.scale) as f32,
            cy - (sy * self.scale) as f32,
        )
    }

    fn corners(&self) -> Vec<PointCoordinates> {
        let [x, y, z] = self.limits;
        let mut corners = Vec::with_capacity(8);
        for cx in [x.min, x.max] {
            for cy in [y.min, y.max] {
                for cz in [z.min, z.max] {
                    corners.push(PointCoordinates::new(cx, cy, cz));
                }
            }
        }
        corners
    }

    /// Box edges, with axis names next to the edges starting at the lowest corner.
    pub fn draw_box(&self, canvas: &mut Canvas, style: &FigureStyle) {
        let width = style.points(0.8).max(1.0);
        let corners = self.corners();
        // corner index bits: x = 4, y = 2, z = 1
        for a in 0..corners.len() {
            for bit in [1, 2, 4] {
                let b = a | bit;
                if b != a {
                    canvas.line(
                        self.project(&corners[a]),
                        self.project(&corners[b]),
                        width,
                        GRID,
                    );
                }
            }
        }

        let text = GlyphText::new(style.tick_label_height);
        let center = self.rect.center();
        for (bit, name) in [(4usize, "X"), (2, "Y"), (1, "Z")] {
            let (a, b) = (self.project(&corners[0]), self.project(&corners[bit]));
            let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
            // push the name away from the box centre
            let (dx, dy) = (mid.0 - center.0, mid.1 - center.1);
            let length = (dx * dx + dy * dy).sqrt().max(1.0);
            let offset = text.height * 1.5;
            let anchor = (mid.0 + dx / length * offset, mid.1 + dy / length * offset);
            text.draw_aligned(canvas, name, anchor, Align::Center, Align::Center, BLACK);
        }
    }
}
