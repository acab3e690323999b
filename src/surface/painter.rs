use egui::{
    Color32, FontId, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2, emath::Rot2,
    epaint::TextShape,
};

use super::Surface;

/// Live surface drawing into an egui painter at the canvas rect
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn clear(&mut self) {
        // Shapes from earlier frames are already gone, only the backdrop is needed
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn polyline(&mut self, points: &[Pos2], stroke: EguiStroke) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .with_clip_rect(self.rect)
            .add(Shape::line(points, stroke));
    }

    fn glyph(&mut self, text: &str, anchor: Pos2, angle: f32, font_size: f32, color: Color32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), FontId::proportional(font_size), color);
        // TextShape rotates around its top-left corner, so shift that corner
        // to where the centred galley's corner ends up after rotation.
        let half = galley.size() / 2.0;
        let top_left = self.to_screen(anchor) + Rot2::from_angle(angle) * -half;
        self.painter.with_clip_rect(self.rect).add(Shape::Text(
            TextShape::new(top_left, galley, color).with_angle(angle),
        ));
    }
}
