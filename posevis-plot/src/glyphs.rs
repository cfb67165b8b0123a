//! Stroke glyphs for the handful of characters figures need: frame indices,
//! tick values and axis names.
//!
//! Glyphs live in a unit cell, `GLYPH_WIDTH` wide and 1 tall, y pointing down.

use image::Rgb;

use crate::canvas::{Canvas, Pixel};

type Stroke = ((f32, f32), (f32, f32));

const GLYPH_WIDTH: f32 = 0.6;
const GLYPH_GAP: f32 = 0.3;
const DOT_ADVANCE: f32 = 0.35;
const SPACE_ADVANCE: f32 = 0.5;

const W: f32 = GLYPH_WIDTH;
const MID: f32 = W / 2.0;

// seven-segment layout
const SEG_A: Stroke = ((0.0, 0.0), (W, 0.0));
const SEG_B: Stroke = ((W, 0.0), (W, 0.5));
const SEG_C: Stroke = ((W, 0.5), (W, 1.0));
const SEG_D: Stroke = ((0.0, 1.0), (W, 1.0));
const SEG_E: Stroke = ((0.0, 0.5), (0.0, 1.0));
const SEG_F: Stroke = ((0.0, 0.0), (0.0, 0.5));
const SEG_G: Stroke = ((0.0, 0.5), (W, 0.5));

fn strokes(c: char) -> Option<&'static [Stroke]> {
    let strokes: &'static [Stroke] = match c {
        '0' => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F],
        '1' => &[SEG_B, SEG_C],
        '2' => &[SEG_A, SEG_B, SEG_G, SEG_E, SEG_D],
        '3' => &[SEG_A, SEG_B, SEG_G, SEG_C, SEG_D],
        '4' => &[SEG_F, SEG_G, SEG_B, SEG_C],
        '5' => &[SEG_A, SEG_F, SEG_G, SEG_C, SEG_D],
        '6' => &[SEG_A, SEG_F, SEG_G, SEG_E, SEG_C, SEG_D],
        '7' => &[SEG_A, SEG_B, SEG_C],
        '8' => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F, SEG_G],
        '9' => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_F, SEG_G],
        '-' => &[((0.1, 0.5), (W - 0.1, 0.5))],
        'X' => &[((0.0, 0.0), (W, 1.0)), ((W, 0.0), (0.0, 1.0))],
        'Y' => &[((0.0, 0.0), (MID, 0.5)), ((W, 0.0), (MID, 0.5)), ((MID, 0.5), (MID, 1.0))],
        'Z' => &[((0.0, 0.0), (W, 0.0)), ((W, 0.0), (0.0, 1.0)), ((0.0, 1.0), (W, 1.0))],
        _ => return None,
    };
    Some(strokes)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Text renderer at a fixed cap height in pixels.
#[derive(Clone, Copy, Debug)]
pub struct GlyphText {
    pub height: f32,
}

impl GlyphText {
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    fn stroke_width(&self) -> f32 {
        (self.height * 0.12).max(1.0)
    }

    fn advance(&self, c: char) -> f32 {
        let cells = match c {
            '.' => DOT_ADVANCE,
            ' ' => SPACE_ADVANCE,
            _ => GLYPH_WIDTH + GLYPH_GAP,
        };
        cells * self.height
    }

    pub fn width(&self, text: &str) -> f32 {
        let total: f32 = text.chars().map(|c| self.advance(c)).sum();
        match text.chars().last() {
            Some('.') | Some(' ') | None => total,
            Some(_) => total - GLYPH_GAP * self.height,
        }
    }

    /// Draws `text` with its top-left corner at `origin`.
    pub fn draw(&self, canvas: &mut Canvas, text: &str, origin: Pixel, color: Rgb<u8>) {
        let h = self.height;
        let width = self.stroke_width();
        let mut x = origin.0;
        for c in text.chars() {
            if c == '.' {
                canvas.disc((x + 0.1 * h, origin.1 + h), width * 0.75, color);
            } else if let Some(strokes) = strokes(c) {
                for &((x0, y0), (x1, y1)) in strokes {
                    canvas.line(
                        (x + x0 * h, origin.1 + y0 * h),
                        (x + x1 * h, origin.1 + y1 * h),
                        width,
                        color,
                    );
                }
            } else if c != ' ' {
                log::trace!("no glyph for {c:?}");
            }
            x += self.advance(c);
        }
    }

    /// Draws `text` positioned relative to `anchor`.
    pub fn draw_aligned(
        &self,
        canvas: &mut Canvas,
        text: &str,
        anchor: Pixel,
        horizontal: Align,
        vertical: Align,
        color: Rgb<u8>,
    ) {
        let width = self.width(text);
        let x = match horizontal {
            Align::Start => anchor.0,
            Align::Center => anchor.0 - width / 2.0,
            Align::End => anchor.0 - width,
        };
        let y = match vertical {
            Align::Start => anchor.1,
            Align::Center => anchor.1 - self.height / 2.0,
            Align::End => anchor.1 - self.height,
        };
        self.draw(canvas, text, (x, y), color);
    }
}
