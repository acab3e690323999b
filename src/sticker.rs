use egui::{Color32, Pos2};

use crate::command::CommandId;
use crate::surface::Surface;

/// Font size stickers are drawn at, in canvas pixels
pub const STICKER_FONT_SIZE: f32 = 30.0;

/// An emoji placed on the canvas at a fixed rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: CommandId,
    anchor: Pos2,
    glyph: String,
    rotation_degrees: f32,
    color: Color32,
}

impl Sticker {
    pub fn new(anchor: Pos2, glyph: impl Into<String>, rotation_degrees: f32, color: Color32) -> Self {
        Self {
            id: CommandId::new(),
            anchor,
            glyph: glyph.into(),
            rotation_degrees,
            color,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Dragging a sticker repositions it rather than adding points
    pub fn move_to(&mut self, anchor: Pos2) {
        self.anchor = anchor;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_glyph(surface, &self.glyph, self.anchor, self.rotation_degrees, self.color);
    }
}

/// Draw a sticker glyph centred at `anchor`.
///
/// Shared with the sticker preview so the two look identical.
pub(crate) fn draw_glyph(
    surface: &mut dyn Surface,
    glyph: &str,
    anchor: Pos2,
    rotation_degrees: f32,
    color: Color32,
) {
    surface.glyph(
        glyph,
        anchor,
        rotation_degrees.to_radians(),
        STICKER_FONT_SIZE,
        color,
    );
}
