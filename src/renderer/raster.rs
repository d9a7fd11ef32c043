// renderer/raster.rs
// Software canvas backed by an RGBA image, used for headless frames and PNG snapshots

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba as Pixel, RgbaImage};
use std::path::Path;
use ultraviolet::Vec2;

use super::canvas::{Canvas, Rgba, Stroke};
use crate::error::CavityError;

/// Opaque backdrop the trail fade settles towards (#1a1a2e).
pub const BACKGROUND: Rgba = [26, 26, 46, 255];

/// Glyph cell edge in pixels (8x8 bitmap font).
const GLYPH_SIZE: i64 = 8;

pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Pixel(BACKGROUND)) }
    }

    /// Reallocate the pixel buffer. Previous contents are dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::from_pixel(width, height, Pixel(BACKGROUND));
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.image.width() && y < self.image.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CavityError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let a = color[3] as f32 / 255.0;
        if a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for i in 0..3 {
            let d = dst.0[i] as f32;
            let s = color[i] as f32;
            dst.0[i] = (s * a + d * (1.0 - a)).round() as u8;
        }
        let da = dst.0[3] as f32 / 255.0;
        dst.0[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
    }

    /// Pixel rows/cols whose centers may fall inside [min, max], clipped to the image.
    fn span(&self, min: Vec2, max: Vec2) -> Option<(i64, i64, i64, i64)> {
        let x0 = (min.x - 0.5).ceil().max(0.0) as i64;
        let y0 = (min.y - 0.5).ceil().max(0.0) as i64;
        let x1 = ((max.x - 0.5).floor() as i64).min(self.image.width() as i64 - 1);
        let y1 = ((max.y - 0.5).floor() as i64).min(self.image.height() as i64 - 1);
        if x1 < x0 || y1 < y0 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }

    fn solid_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let half = (width * 0.5).max(0.5);
        let lo = Vec2::new(from.x.min(to.x), from.y.min(to.y)) - Vec2::broadcast(half);
        let hi = Vec2::new(from.x.max(to.x), from.y.max(to.y)) + Vec2::broadcast(half);
        let Some((x0, y0, x1, y1)) = self.span(lo, hi) else {
            return;
        };
        let seg = to - from;
        let len_sq = seg.mag_sq();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 { ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
                let closest = from + seg * t;
                if (p - closest).mag_sq() <= half * half {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        if let Some((x0, y0, x1, y1)) = self.span(min, max) {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_rect(&mut self, min: Vec2, max: Vec2, stroke: Stroke) {
        let top_right = Vec2::new(max.x, min.y);
        let bottom_left = Vec2::new(min.x, max.y);
        self.draw_line(min, top_right, stroke);
        self.draw_line(top_right, max, stroke);
        self.draw_line(max, bottom_left, stroke);
        self.draw_line(bottom_left, min, stroke);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        let Some((on, off)) = stroke.dash.filter(|(on, off)| *on > 0.0 && *off >= 0.0) else {
            self.solid_segment(from, to, stroke.width, stroke.color);
            return;
        };
        let length = (to - from).mag();
        if length <= 0.0 {
            return;
        }
        let dir = (to - from) / length;
        let mut t = 0.0;
        while t < length {
            let end = (t + on).min(length);
            self.solid_segment(from + dir * t, from + dir * end, stroke.width, stroke.color);
            t += on + off;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r = Vec2::broadcast(radius);
        let Some((x0, y0, x1, y1)) = self.span(center - r, center + r) else {
            return;
        };
        let r_sq = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if (p - center).mag_sq() <= r_sq {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn draw_text(&mut self, anchor: Vec2, text: &str, color: Rgba) {
        let count = text.chars().count() as i64;
        let left = anchor.x.round() as i64 - count * GLYPH_SIZE / 2;
        let top = anchor.y.round() as i64 - GLYPH_SIZE;

        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = BASIC_FONTS.get(ch) else {
                log::trace!("no glyph for {:?}", ch);
                continue;
            };
            let x0 = left + i as i64 * GLYPH_SIZE;
            for (dy, row) in rows.iter().enumerate() {
                // bit 0 is the leftmost column
                for dx in 0..GLYPH_SIZE {
                    if (*row >> dx) & 1 != 0 {
                        self.blend(x0 + dx, top + dy as i64, color);
                    }
                }
            }
        }
    }
}
