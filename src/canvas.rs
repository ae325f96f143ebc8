//! Software rasterizer over an RGBA8 frame

use rusttype::{point, Scale};

use crate::config::Color;
use crate::geometry::RectF;
use crate::text::GlyphFont;

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA of one pixel, `None` outside the frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Source-over blend of `color` at `alpha` coverage. Out-of-frame writes are dropped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Stroke a circular arc inscribed in `bounds`.
    ///
    /// Angles are degrees, 0 at 3 o'clock, growing clockwise. The stroke is
    /// centered on the circle and both ends get round caps.
    pub fn stroke_arc(
        &mut self,
        bounds: RectF,
        start_angle: f32,
        sweep_angle: f32,
        stroke_width: f32,
        color: Color,
    ) {
        if sweep_angle <= 0.0 || stroke_width <= 0.0 {
            return;
        }
        let (cx, cy) = bounds.center();
        let r = bounds.width().min(bounds.height()) / 2.0;
        if r <= 0.0 {
            return;
        }
        let half = stroke_width / 2.0;
        let sweep = sweep_angle.min(360.0);

        let cap = |angle: f32| {
            let rad = angle.to_radians();
            (cx + rad.cos() * r, cy + rad.sin() * r)
        };
        let start_cap = cap(start_angle);
        let end_cap = cap(start_angle + sweep);

        let reach = r + half + 1.0;
        let min_x = (cx - reach).floor() as i32;
        let max_x = (cx + reach).ceil() as i32;
        let min_y = (cy - reach).floor() as i32;
        let max_y = (cy + reach).ceil() as i32;

        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let dx = px - cx;
                let dy = py - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                let angle = dy.atan2(dx).to_degrees();
                let relative = (angle - start_angle).rem_euclid(360.0);
                let d = if relative <= sweep {
                    (dist - r).abs()
                } else {
                    let to_start = (px - start_cap.0).hypot(py - start_cap.1);
                    let to_end = (px - end_cap.0).hypot(py - end_cap.1);
                    to_start.min(to_end)
                };

                let coverage = (half - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.01 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Draw one line of text with its baseline origin at (`x`, `baseline`)
    pub fn fill_text(
        &mut self,
        font: &GlyphFont,
        text: &str,
        x: f32,
        baseline: f32,
        size: f32,
        color: Color,
    ) {
        let glyphs: Vec<_> = font
            .font()
            .layout(text, Scale::uniform(size), point(x, baseline))
            .collect();
        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    self.blend_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, color, v);
                });
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 4)
    }
}
