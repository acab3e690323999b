use egui::{Color32, Pos2, Rect, Stroke as EguiStroke, Vec2};

mod glyphs;
mod painter;
mod raster;

pub use glyphs::GlyphSet;
pub use painter::PainterSurface;
pub use raster::RasterSurface;

/// Something commands can be drawn onto.
///
/// All coordinates are logical canvas pixels. Implementations apply their own
/// offset or scale, so callers never see device pixels.
pub trait Surface {
    /// Logical size of the drawable area
    fn size(&self) -> Vec2;

    /// Wipe everything drawn so far
    fn clear(&mut self);

    /// Draw a connected line through `points` in order
    fn polyline(&mut self, points: &[Pos2], stroke: EguiStroke);

    /// Draw `text` centred on `anchor`, rotated clockwise by `angle` radians
    fn glyph(&mut self, text: &str, anchor: Pos2, angle: f32, font_size: f32, color: Color32);
}

/// Distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box of a set of points grown by `padding` on every side
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min = Pos2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for point in points {
        min = min.min(*point);
        max = max.max(*point);
    }

    Rect::from_min_max(min, max).expand(padding)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A single recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Polyline { points: Vec<Pos2>, stroke: EguiStroke },
        Glyph { text: String, anchor: Pos2, angle: f32, font_size: f32, color: Color32 },
    }

    /// Surface that records calls instead of drawing
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            Vec2::splat(256.0)
        }

        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }

        fn polyline(&mut self, points: &[Pos2], stroke: EguiStroke) {
            self.calls.push(DrawCall::Polyline { points: points.to_vec(), stroke });
        }

        fn glyph(&mut self, text: &str, anchor: Pos2, angle: f32, font_size: f32, color: Color32) {
            self.calls.push(DrawCall::Glyph {
                text: text.to_owned(),
                anchor,
                angle,
                font_size,
                color,
            });
        }
    }
}
