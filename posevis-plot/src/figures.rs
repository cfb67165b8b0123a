//! The two pose figures: an overview (3D view plus top-down view) and a sheet
//! of side views with per-frame height and range plots.

use image::{Rgb, RgbImage};
use posevis_core::{pose::CameraPose, PointCoordinates};

use crate::{
    canvas::{Canvas, Pixel, ARROW, BLACK, BLUE, GREEN, RED, TRAJECTORY},
    figure_cfg::FigureStyle,
    glyphs::{Align, GlyphText},
    panel::{AxisNames, Panel2d, Panel3d, PixelRect},
};

const ELEVATION_DEG: f64 = 30.0;
const AZIMUTH_DEG: f64 = -60.0;
const AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

fn dash_pattern(style: &FigureStyle) -> (f32, f32) {
    (3.7 * style.line_width, 1.6 * style.line_width)
}

/// Camera positions and forward arrows projected onto two world axes.
struct PlanarView<'a> {
    poses: &'a [CameraPose],
    axes: (usize, usize),
    style: &'a FigureStyle,
}

impl PlanarView<'_> {
    fn coords(&self, point: &PointCoordinates) -> (f64, f64) {
        (point[self.axes.0], point[self.axes.1])
    }

    /// In-plane arrow: unit direction and shaft length, absent when the
    /// camera looks straight out of the plane.
    fn arrow(&self, pose: &CameraPose) -> Option<((f64, f64), f64)> {
        let (dx, dy) = self.coords(&(pose.forward * self.style.arrow_scale));
        let length = (dx * dx + dy * dy).sqrt();
        (length > 1e-12).then(|| ((dx / length, dy / length), length))
    }

    /// Everything the panel limits have to cover: positions, shaft ends and
    /// head tips.
    fn extent(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.poses.len() * 2);
        for pose in self.poses {
            let (x, y) = self.coords(&pose.position);
            points.push((x, y));
            if let Some(((ux, uy), length)) = self.arrow(pose) {
                let reach = length + self.style.head_length;
                points.push((x + ux * reach, y + uy * reach));
            }
        }
        points
    }

    fn draw(&self, canvas: &mut Canvas, rect: PixelRect, with_labels: bool) -> Panel2d {
        let style = self.style;
        let panel = Panel2d::fit(rect, &self.extent(), true);
        panel.draw_axes(
            canvas,
            style,
            AxisNames {
                x: Some(AXIS_NAMES[self.axes.0]),
                y: Some(AXIS_NAMES[self.axes.1]),
            },
        );

        let trajectory: Vec<Pixel> = self
            .poses
            .iter()
            .map(|pose| {
                let (x, y) = self.coords(&pose.position);
                panel.to_pixel(x, y)
            })
            .collect();
        let (dash, gap) = dash_pattern(style);
        canvas.dashed_polyline(&trajectory, style.line_width, dash, gap, TRAJECTORY);

        for pixel in &trajectory {
            canvas.disc(*pixel, style.marker_radius, RED);
        }

        for pose in self.poses {
            if let Some(direction) = self.arrow(pose) {
                self.draw_arrow(canvas, &panel, pose, direction);
            }
        }

        if with_labels {
            let text = GlyphText::new(style.label_height);
            for (index, pixel) in trajectory.iter().enumerate() {
                text.draw_aligned(
                    canvas,
                    &index.to_string(),
                    *pixel,
                    Align::Start,
                    Align::End,
                    BLACK,
                );
            }
        }
        panel
    }

    /// Shaft to the scaled vector end, then a head of fixed data size beyond it.
    fn draw_arrow(
        &self,
        canvas: &mut Canvas,
        panel: &Panel2d,
        pose: &CameraPose,
        ((ux, uy), length): ((f64, f64), f64),
    ) {
        let style = self.style;
        let (x, y) = self.coords(&pose.position);
        let (ex, ey) = (x + ux * length, y + uy * length);
        let half_width = style.head_width / 2.0;
        let tip = (ex + ux * style.head_length, ey + uy * style.head_length);
        let left = (ex - uy * half_width, ey + ux * half_width);
        let right = (ex + uy * half_width, ey - ux * half_width);

        canvas.line(
            panel.to_pixel(x, y),
            panel.to_pixel(ex, ey),
            style.thin_line_width,
            ARROW,
        );
        canvas.triangle(
            [
                panel.to_pixel(tip.0, tip.1),
                panel.to_pixel(left.0, left.1),
                panel.to_pixel(right.0, right.1),
            ],
            ARROW,
        );
    }
}

fn draw_perspective(
    canvas: &mut Canvas,
    rect: PixelRect,
    poses: &[CameraPose],
    style: &FigureStyle,
) {
    let mut extent: Vec<PointCoordinates> = poses.iter().map(|pose| pose.position).collect();
    extent.extend(poses.iter().map(|pose| pose.arrow_tip(style.arrow_scale)));
    let panel = Panel3d::fit(rect, &extent, ELEVATION_DEG, AZIMUTH_DEG);
    panel.draw_box(canvas, style);

    let trajectory: Vec<Pixel> = poses.iter().map(|pose| panel.project(&pose.position)).collect();
    let (dash, gap) = dash_pattern(style);
    canvas.dashed_polyline(&trajectory, style.line_width, dash, gap, TRAJECTORY);

    for pixel in &trajectory {
        canvas.disc(*pixel, style.marker_radius, RED);
    }

    for (pose, start) in poses.iter().zip(&trajectory) {
        let end = panel.project(&pose.arrow_tip(style.arrow_scale));
        draw_line_arrow(
            canvas,
            *start,
            end,
            style.arrow_length_ratio as f32,
            style.thin_line_width,
        );
    }
}

/// Arrow with an open head of two strokes, sized relative to the shaft.
fn draw_line_arrow(canvas: &mut Canvas, start: Pixel, end: Pixel, head_ratio: f32, width: f32) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    canvas.line(start, end, width, ARROW);
    if length < 1.0 {
        return;
    }

    let head = length * head_ratio;
    let (ux, uy) = (dx / length, dy / length);
    let (sin, cos) = 15f32.to_radians().sin_cos();
    for sign in [-1.0f32, 1.0] {
        // rotate the reversed direction by +-15 degrees
        let (rx, ry) = (-ux * cos - sign * -uy * sin, -uy * cos + sign * -ux * sin);
        canvas.line(end, (end.0 + rx * head, end.1 + ry * head), width, ARROW);
    }
}

fn draw_series(
    canvas: &mut Canvas,
    rect: PixelRect,
    values: &[f64],
    color: Rgb<u8>,
    style: &FigureStyle,
) {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(index, value)| (index as f64, *value))
        .collect();
    let panel = Panel2d::fit(rect, &points, false);
    panel.draw_axes(canvas, style, AxisNames::default());

    let pixels: Vec<Pixel> = points.iter().map(|(x, y)| panel.to_pixel(*x, *y)).collect();
    canvas.polyline(&pixels, style.line_width, color);
    for pixel in &pixels {
        canvas.disc(*pixel, style.small_marker_radius, color);
    }
}

/// 3D perspective panel next to the top-down (X/Y) panel.
pub fn render_overview(poses: &[CameraPose], style: &FigureStyle) -> RgbImage {
    let size = style.figure_3d_px;
    let mut canvas = Canvas::new(size.0, size.1);

    let perspective = PixelRect::fraction(size, 0.04, 0.1, 0.46, 0.9);
    draw_perspective(&mut canvas, perspective, poses, style);

    let top_down = PixelRect::fraction(size, 0.58, 0.1, 0.96, 0.9);
    PlanarView {
        poses,
        axes: (0, 1),
        style,
    }
    .draw(&mut canvas, top_down, true);

    canvas.into_tight_image(style.pad)
}

/// Side (X/Z) and front (Y/Z) views over height and distance-from-origin
/// plots against frame index.
pub fn render_side_views(poses: &[CameraPose], style: &FigureStyle) -> RgbImage {
    let size = style.side_views_px;
    let mut canvas = Canvas::new(size.0, size.1);

    let side = PixelRect::fraction(size, 0.08, 0.05, 0.47, 0.45);
    let front = PixelRect::fraction(size, 0.58, 0.05, 0.97, 0.45);
    let height = PixelRect::fraction(size, 0.08, 0.55, 0.47, 0.94);
    let range = PixelRect::fraction(size, 0.58, 0.55, 0.97, 0.94);

    for (axes, rect) in [((0, 2), side), ((1, 2), front)] {
        PlanarView { poses, axes, style }.draw(&mut canvas, rect, true);
    }

    let heights: Vec<f64> = poses.iter().map(|pose| pose.position.z).collect();
    draw_series(&mut canvas, height, &heights, BLUE, style);

    let distances: Vec<f64> = poses.iter().map(|pose| pose.position.norm()).collect();
    draw_series(&mut canvas, range, &distances, GREEN, style);

    canvas.into_tight_image(style.pad)
}

#[cfg(test)]
mod tests {
    use posevis_core::Direction;

    use super::*;
    use crate::figure_cfg::FigureCfg;

    fn low_res_style() -> FigureStyle {
        FigureCfg {
            dpi: 40,
            ..Default::default()
        }
        .style()
        .unwrap()
    }

    fn circle_of_cameras(count: usize) -> Vec<CameraPose> {
        (0..count)
            .map(|i| {
                let angle = i as f64 / count as f64 * std::f64::consts::TAU;
                let height = 1.0 + 0.1 * i as f64;
                let position = PointCoordinates::new(3.0 * angle.cos(), 3.0 * angle.sin(), height);
                // looking at the origin
                let forward = Direction::new(-angle.cos(), -angle.sin(), -0.2).normalize();
                CameraPose::new(position, forward)
            })
            .collect()
    }

    fn red_pixels(image: &RgbImage) -> usize {
        image.pixels().filter(|pixel| **pixel == RED).count()
    }

    #[test]
    fn overview_has_markers_and_is_cropped() {
        let style = low_res_style();
        let image = render_overview(&circle_of_cameras(8), &style);
        assert!(image.width() <= style.figure_3d_px.0);
        assert!(image.height() <= style.figure_3d_px.1);
        assert!(red_pixels(&image) > 0);
    }

    #[test]
    fn side_views_render_single_camera() {
        let style = low_res_style();
        let poses = vec![CameraPose::new(
            PointCoordinates::new(1.0, 2.0, 3.0),
            Direction::new(0.0, 0.0, -1.0),
        )];
        let image = render_side_views(&poses, &style);
        assert!(red_pixels(&image) > 0);
    }

    #[test]
    fn out_of_plane_arrows_are_skipped() {
        let style = low_res_style();
        let pose = CameraPose::new(PointCoordinates::zeros(), Direction::new(0.0, 0.0, -1.0));
        let poses = [pose];
        let top_down = PlanarView {
            poses: &poses,
            axes: (0, 1),
            style: &style,
        };
        assert!(top_down.arrow(&pose).is_none());
        assert_eq!(top_down.extent().len(), 1);

        let side = PlanarView {
            poses: &poses,
            axes: (0, 2),
            style: &style,
        };
        let (direction, length) = side.arrow(&pose).unwrap();
        assert_eq!(direction, (0.0, -1.0));
        assert!((length - 0.5).abs() < 1e-12);
    }

    #[test]
    fn top_down_panel_is_equal_aspect() {
        let style = low_res_style();
        let mut canvas = Canvas::new(style.figure_3d_px.0, style.figure_3d_px.1);
        let rect = PixelRect::fraction(style.figure_3d_px, 0.1, 0.1, 0.9, 0.9);
        let poses = circle_of_cameras(5);
        let panel = PlanarView {
            poses: &poses,
            axes: (0, 1),
            style: &style,
        }
        .draw(&mut canvas, rect, true);
        let (sx, sy) = panel.scale();
        assert!((sx - sy).abs() < 1e-6 * sx);
    }
}
