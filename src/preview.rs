use egui::{Color32, Pos2, Stroke as EguiStroke, vec2};

use crate::sticker::draw_glyph;
use crate::surface::Surface;
use crate::tools::{ToolMode, ToolState};

/// Offset of the marker preview's sample segment from the pointer
const MARKER_SAMPLE: egui::Vec2 = vec2(10.0, 10.0);

/// Where the next command would land. Never part of the history.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Marker {
        at: Pos2,
        thickness: f32,
        color: Color32,
    },
    Sticker {
        at: Pos2,
        glyph: String,
        rotation_degrees: f32,
        color: Color32,
    },
}

impl Preview {
    pub fn for_tool(tools: &ToolState, at: Pos2) -> Self {
        match (tools.mode(), tools.active_glyph()) {
            (ToolMode::Sticker, Some(glyph)) => Preview::Sticker {
                at,
                glyph: glyph.to_owned(),
                rotation_degrees: tools.rotation_degrees(),
                color: tools.color(),
            },
            _ => Preview::Marker {
                at,
                thickness: tools.thickness(),
                color: tools.color(),
            },
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            // A short sample segment shows the marker's width
            Preview::Marker { at, thickness, color } => {
                surface.polyline(&[*at, *at + MARKER_SAMPLE], EguiStroke::new(*thickness, *color));
            }
            Preview::Sticker {
                at,
                glyph,
                rotation_degrees,
                color,
            } => draw_glyph(surface, glyph, *at, *rotation_degrees, *color),
        }
    }
}

/// Holds the current tool preview, if any
#[derive(Debug, Default)]
pub struct PreviewAgent {
    current: Option<Preview>,
}

impl PreviewAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the preview for a pointer hovering at `at`
    pub fn track(&mut self, tools: &ToolState, at: Pos2) {
        self.current = Some(Preview::for_tool(tools, at));
    }

    /// Drop the preview, e.g. when drawing starts or the tool changes
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sticker::STICKER_FONT_SIZE;
    use crate::surface::testing::{DrawCall, RecordingSurface};

    #[test]
    fn test_marker_preview_shows_thickness() {
        let mut tools = ToolState::from_config(&Config::default());
        tools.set_picker_color(Color32::RED);
        tools.select_stroke(5.0);

        let preview = Preview::for_tool(&tools, Pos2::new(20.0, 20.0));
        let mut surface = RecordingSurface::default();
        preview.render(&mut surface);
        assert_eq!(
            surface.calls,
            vec![DrawCall::Polyline {
                points: vec![Pos2::new(20.0, 20.0), Pos2::new(30.0, 30.0)],
                stroke: EguiStroke::new(5.0, Color32::RED),
            }]
        );
    }

    #[test]
    fn test_sticker_preview_matches_committed_style() {
        let mut tools = ToolState::from_config(&Config::default());
        tools.set_picker_color(Color32::GREEN);
        tools.select_sticker_with_rotation("🌟", 90.0);
        let at = Pos2::new(40.0, 40.0);

        let mut previewed = RecordingSurface::default();
        Preview::for_tool(&tools, at).render(&mut previewed);
        let mut committed = RecordingSurface::default();
        tools.new_command(at).render(&mut committed);

        assert_eq!(previewed.calls, committed.calls);
        assert!(matches!(
            previewed.calls.as_slice(),
            [DrawCall::Glyph { font_size, .. }] if *font_size == STICKER_FONT_SIZE
        ));
    }

    #[test]
    fn test_track_and_invalidate() {
        let tools = ToolState::from_config(&Config::default());
        let mut agent = PreviewAgent::new();
        assert!(agent.current().is_none());

        agent.track(&tools, Pos2::new(1.0, 2.0));
        assert!(matches!(agent.current(), Some(Preview::Marker { .. })));

        agent.invalidate();
        assert!(agent.current().is_none());
    }
}
