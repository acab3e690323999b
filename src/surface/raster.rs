use egui::{Color32, Pos2, Stroke as EguiStroke, Vec2, emath::Rot2};
use image::{Rgba, RgbaImage};

use super::{GlyphSet, Surface, calculate_bounds, distance_to_line_segment};
use crate::error::{Error, Result};

/// Offscreen surface backed by an RGBA image.
///
/// Logical coordinates are multiplied by `scale` before hitting pixels, so a
/// 256x256 canvas with scale 4 produces a 1024x1024 image.
pub struct RasterSurface<'a> {
    image: RgbaImage,
    scale: f32,
    glyphs: &'a GlyphSet,
}

impl<'a> RasterSurface<'a> {
    /// Create a transparent surface of `width`x`height` logical pixels
    pub fn new(width: u32, height: u32, scale: u32, glyphs: &'a GlyphSet) -> Result<Self> {
        let too_big = || Error::Surface { width, height };
        if width == 0 || height == 0 || scale == 0 {
            return Err(too_big());
        }
        let px_width = width.checked_mul(scale).ok_or_else(too_big)?;
        let px_height = height.checked_mul(scale).ok_or_else(too_big)?;
        // RgbaImage::new panics when the buffer length overflows
        (px_width as usize)
            .checked_mul(px_height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(too_big)?;

        Ok(Self {
            image: RgbaImage::new(px_width, px_height),
            scale: scale as f32,
            glyphs,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Source-over blend `color` at `coverage` into one pixel
    fn blend(&mut self, x: u32, y: u32, color: Color32, coverage: f32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let src_a = (a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let Rgba([dr, dg, db, da]) = *self.image.get_pixel(x, y);
        let dst_a = da as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |s: u8, d: u8| -> u8 {
            let c = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };

        self.image.put_pixel(
            x,
            y,
            Rgba([
                mix(r, dr),
                mix(g, dg),
                mix(b, db),
                (out_a * 255.0).round() as u8,
            ]),
        );
    }

    /// Pixel range covering `[min, max)` in device space, clamped to the image
    fn pixel_span(&self, min: f32, max: f32, limit: u32) -> std::ops::Range<u32> {
        let start = min.floor().max(0.0) as u32;
        let end = (max.ceil().max(0.0) as u32).min(limit);
        start.min(end)..end
    }
}

impl Surface for RasterSurface<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32) / self.scale
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn polyline(&mut self, points: &[Pos2], stroke: EguiStroke) {
        if points.len() < 2 || stroke.is_empty() {
            return;
        }

        let device: Vec<Pos2> = points.iter().map(|p| (p.to_vec2() * self.scale).to_pos2()).collect();
        let half = stroke.width * self.scale / 2.0;
        let bounds = calculate_bounds(&device, half + 1.0);
        let xs = self.pixel_span(bounds.min.x, bounds.max.x, self.image.width());
        let ys = self.pixel_span(bounds.min.y, bounds.max.y, self.image.height());
        if xs.is_empty() || ys.is_empty() {
            return;
        }

        // Segments max-combine into one buffer so joints are not blended twice
        let stride = xs.len();
        let mut coverage = vec![0.0f32; stride * ys.len()];
        for seg in device.windows(2) {
            let seg_bounds = calculate_bounds(seg, half + 1.0);
            let seg_xs = self.pixel_span(seg_bounds.min.x, seg_bounds.max.x, xs.end);
            let seg_ys = self.pixel_span(seg_bounds.min.y, seg_bounds.max.y, ys.end);
            for y in seg_ys.start.max(ys.start)..seg_ys.end {
                let row = (y - ys.start) as usize * stride;
                for x in seg_xs.start.max(xs.start)..seg_xs.end {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let c = (half + 0.5 - distance_to_line_segment(center, seg[0], seg[1])).clamp(0.0, 1.0);
                    let cell = &mut coverage[row + (x - xs.start) as usize];
                    *cell = cell.max(c);
                }
            }
        }

        for (i, c) in coverage.into_iter().enumerate() {
            if c > 0.0 {
                let x = xs.start + (i % stride) as u32;
                let y = ys.start + (i / stride) as u32;
                self.blend(x, y, stroke.color, c);
            }
        }
    }

    fn glyph(&mut self, text: &str, anchor: Pos2, angle: f32, font_size: f32, color: Color32) {
        let Some(mask) = self.glyphs.mask(text, font_size * self.scale) else {
            return;
        };

        let anchor = (anchor.to_vec2() * self.scale).to_pos2();
        let rotation = Rot2::from_angle(angle);
        let inverse = rotation.inverse();

        let corners = [
            Vec2::ZERO,
            Vec2::new(mask.width as f32, 0.0),
            Vec2::new(0.0, mask.height as f32),
            Vec2::new(mask.width as f32, mask.height as f32),
        ]
        .map(|corner| anchor + rotation * (corner - mask.center));
        let bounds = calculate_bounds(&corners, 1.0);
        let xs = self.pixel_span(bounds.min.x, bounds.max.x, self.image.width());
        let ys = self.pixel_span(bounds.min.y, bounds.max.y, self.image.height());

        for y in ys {
            for x in xs.clone() {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let local = inverse * (center - anchor) + mask.center;
                let coverage = mask.sample(local.x, local.y);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}
