//! Software [`Canvas`] over a `0x00RRGGBB` pixel buffer.
//!
//! Shapes are alpha-blended onto the buffer. Text uses a built-in 5x7 bitmap
//! font scaled by whole pixels; lowercase letters are drawn as capitals.

use alloc::vec;
use alloc::vec::Vec;

use crate::render::{Canvas, Rgba, TextAlign};

const GLYPH_W: usize = 5;
const GLYPH_H: usize = 7;

/// Owned pixel buffer, row-major, one `u32` per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn blend_span(&mut self, x0: usize, x1: usize, y: usize, color: Rgba) {
        let row = y * self.width;
        for px in &mut self.pixels[row + x0..row + x1] {
            *px = blend(*px, color);
        }
    }

    fn clip_x(&self, x: f32) -> usize {
        (libm::roundf(x).max(0.0) as usize).min(self.width)
    }

    fn clip_y(&self, y: f32) -> usize {
        (libm::roundf(y).max(0.0) as usize).min(self.height)
    }
}

/// Pack an opaque colour into the buffer's pixel format.
pub fn pack(color: Rgba) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | (color.b as u32)
}

fn blend(dst: u32, color: Rgba) -> u32 {
    let a = color.a.clamp(0.0, 1.0);
    if a >= 1.0 {
        return pack(color);
    }
    if a <= 0.0 {
        return dst;
    }
    let mix = |shift: u32, src: u8| -> u32 {
        let d = ((dst >> shift) & 0xff) as f32;
        let v = src as f32 * a + d * (1.0 - a);
        (libm::roundf(v) as u32).min(255) << shift
    };
    mix(16, color.r) | mix(8, color.g) | mix(0, color.b)
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let (x0, x1) = (self.clip_x(x), self.clip_x(x + w));
        let (y0, y1) = (self.clip_y(y), self.clip_y(y + h));
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            self.blend_span(x0, x1, row, color);
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, line_width: f32) {
        let half = line_width / 2.0;
        // top, bottom, left, right; side strokes skip the corners already drawn
        self.fill_rect(x - half, y - half, w + line_width, line_width, color);
        self.fill_rect(x - half, y + h - half, w + line_width, line_width, color);
        self.fill_rect(x - half, y + half, line_width, h - line_width, color);
        self.fill_rect(x + w - half, y + half, line_width, h - line_width, color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let y0 = self.clip_y(libm::floorf(cy - radius));
        let y1 = self.clip_y(libm::ceilf(cy + radius));
        let x0 = self.clip_x(libm::floorf(cx - radius));
        let x1 = self.clip_x(libm::ceilf(cx + radius));
        for py in y0..y1 {
            let dy = py as f32 + 0.5 - cy;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    let idx = py * self.width + px;
                    self.pixels[idx] = blend(self.pixels[idx], color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Rgba) {
        let count = text.chars().count();
        if count == 0 {
            return;
        }
        let mut scale = libm::roundf(size / 8.0).max(1.0);
        // long lines shrink until they fit the buffer
        while scale > 1.0 && count as f32 * (GLYPH_W + 1) as f32 * scale - scale > self.width as f32 {
            scale -= 1.0;
        }
        let advance = (GLYPH_W + 1) as f32 * scale;
        let width = count as f32 * advance - scale;
        let mut pen_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let top = y - GLYPH_H as f32 * scale;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..GLYPH_W {
                    if (bits >> (GLYPH_W - 1 - rx)) & 1 == 1 {
                        self.fill_rect(
                            pen_x + rx as f32 * scale,
                            top + ry as f32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += advance;
        }
    }
}

/// 5x7 glyph rows, most significant of the low five bits on the left.
fn glyph(ch: char) -> [u8; GLYPH_H] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0; GLYPH_H],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
