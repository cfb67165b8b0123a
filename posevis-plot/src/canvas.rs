use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut},
    point::Point,
};

pub type Pixel = (f32, f32);

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
pub const GRID: Rgb<u8> = Rgb([176, 176, 176]);
// blue at 70% over white
pub const ARROW: Rgb<u8> = Rgb([77, 77, 255]);
// green at 50% over white
pub const TRAJECTORY: Rgb<u8> = Rgb([128, 192, 128]);

fn to_point((x, y): Pixel) -> Point<i32> {
    Point::new(x.round() as i32, y.round() as i32)
}

fn lerp(a: Pixel, b: Pixel, t: f32) -> Pixel {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// White raster with stroke primitives sized in pixels.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width.max(1), height.max(1), WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn disc(&mut self, center: Pixel, radius: f32, color: Rgb<u8>) {
        let center = to_point(center);
        draw_filled_circle_mut(
            &mut self.image,
            (center.x, center.y),
            radius.round().max(1.0) as i32,
            color,
        );
    }

    /// Straight stroke with round caps.
    pub fn line(&mut self, from: Pixel, to: Pixel, width: f32, color: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if !length.is_finite() {
            return;
        }
        if width <= 1.5 {
            draw_line_segment_mut(&mut self.image, from, to, color);
            return;
        }

        let half = width / 2.0;
        if length < 0.5 {
            self.disc(from, half, color);
            return;
        }
        // half >= 0.75, so opposite corners never round onto each other
        let (nx, ny) = (-dy / length * half, dx / length * half);
        let quad = [
            to_point((from.0 + nx, from.1 + ny)),
            to_point((to.0 + nx, to.1 + ny)),
            to_point((to.0 - nx, to.1 - ny)),
            to_point((from.0 - nx, from.1 - ny)),
        ];
        draw_polygon_mut(&mut self.image, &quad, color);
        self.disc(from, half, color);
        self.disc(to, half, color);
    }

    pub fn polyline(&mut self, points: &[Pixel], width: f32, color: Rgb<u8>) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
    }

    /// Polyline with a dash pattern that carries over between segments.
    pub fn dashed_polyline(
        &mut self,
        points: &[Pixel],
        width: f32,
        dash: f32,
        gap: f32,
        color: Rgb<u8>,
    ) {
        let period = dash + gap;
        if dash <= 0.0 || gap <= 0.0 {
            self.polyline(points, width, color);
            return;
        }

        let mut phase = 0.0f32;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
            if !length.is_finite() || length == 0.0 {
                continue;
            }
            let mut travelled = 0.0f32;
            while travelled < length {
                let in_dash = phase < dash;
                let left_in_state = if in_dash { dash - phase } else { period - phase };
                let step = left_in_state.min(length - travelled);
                if in_dash {
                    self.line(
                        lerp(a, b, travelled / length),
                        lerp(a, b, (travelled + step) / length),
                        width,
                        color,
                    );
                }
                travelled += step;
                phase += step;
                if phase >= period - 1e-3 {
                    phase = 0.0;
                }
            }
        }
    }

    pub fn triangle(&mut self, corners: [Pixel; 3], color: Rgb<u8>) {
        let points = corners.map(to_point);
        if points[0] == points[2] || points[0] == points[1] || points[1] == points[2] {
            // collapsed to a sliver
            self.line(corners[0], corners[1], 1.0, color);
            self.line(corners[1], corners[2], 1.0, color);
            return;
        }
        draw_polygon_mut(&mut self.image, &points, color);
    }

    pub fn rect_outline(
        &mut self,
        top_left: Pixel,
        bottom_right: Pixel,
        width: f32,
        color: Rgb<u8>,
    ) {
        let (left, top) = top_left;
        let (right, bottom) = bottom_right;
        self.polyline(
            &[
                (left, top),
                (right, top),
                (right, bottom),
                (left, bottom),
                (left, top),
            ],
            width,
            color,
        );
    }

    /// Crops to the drawn content plus `pad` pixels of margin.
    pub fn into_tight_image(self, pad: u32) -> RgbImage {
        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        for (x, y, pixel) in self.image.enumerate_pixels() {
            if *pixel != WHITE {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if min_x > max_x {
            return self.image;
        }

        let x0 = min_x.saturating_sub(pad);
        let y0 = min_y.saturating_sub(pad);
        let x1 = (max_x + pad).min(self.image.width() - 1);
        let y1 = (max_y + pad).min(self.image.height() - 1);
        image::imageops::crop_imm(&self.image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_crop_keeps_padding() {
        let mut canvas = Canvas::new(200, 100);
        canvas.disc((100.0, 50.0), 5.0, RED);
        let image = canvas.into_tight_image(10);
        assert_eq!(image.width(), 31);
        assert_eq!(image.height(), 31);
        assert_eq!(*image.get_pixel(15, 15), RED);
        assert_eq!(*image.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn blank_canvas_is_not_cropped() {
        let image = Canvas::new(40, 30).into_tight_image(5);
        assert_eq!(image.dimensions(), (40, 30));
    }

    #[test]
    fn thick_line_covers_its_width() {
        let mut canvas = Canvas::new(100, 100);
        canvas.line((10.0, 50.0), (90.0, 50.0), 6.0, BLUE);
        assert_eq!(*canvas.image().get_pixel(50, 48), BLUE);
        assert_eq!(*canvas.image().get_pixel(50, 52), BLUE);
        assert_eq!(*canvas.image().get_pixel(50, 40), WHITE);
    }

    #[test]
    fn dashes_leave_gaps() {
        let mut canvas = Canvas::new(200, 20);
        let points = [(0.0, 10.0), (100.0, 10.0), (199.0, 10.0)];
        canvas.dashed_polyline(&points, 1.0, 10.0, 10.0, GREEN);
        let row: Vec<bool> = (0..200)
            .map(|x| *canvas.image().get_pixel(x, 10) == GREEN)
            .collect();
        assert!(row[5]);
        assert!(!row[15]);
        assert!(row[25]);
        assert!(row[105]);
        assert!(!row[115]);
    }
}
