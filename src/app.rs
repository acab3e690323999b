use egui::{PointerButton, Pos2, Rect};
use log::warn;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{ButtonAction, InputController, InputEvent};
use crate::renderer::Renderer;
use crate::state::AppState;
use crate::surface::PainterSurface;
use crate::tools::ToolMode;

pub const APP_NAME: &str = "Sticker Pad";

/// Text the custom sticker prompt starts with
const STICKER_PROMPT_DEFAULT: &str = "✨";

pub struct StickerPadApp {
    config: Config,
    renderer: Renderer,
    state: AppState,
    input: InputController,
    /// Open custom sticker prompt and its text
    sticker_prompt: Option<String>,
    status: Option<String>,
}

impl StickerPadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self> {
        if cc.gl.is_none() {
            return Err(Error::NoRenderContext);
        }

        let renderer = Renderer::new(&config)?;
        let ctx = cc.egui_ctx.clone();
        let input = InputController::new().with_repaint_hook(move || ctx.request_repaint());

        Ok(Self {
            state: AppState::new(&config),
            renderer,
            input,
            config,
            sticker_prompt: None,
            status: None,
        })
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(self.config.canvas_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        // The prompt window can sit on top of the canvas
        if self.sticker_prompt.is_none() {
            let events = ui.input(|i| i.events.clone());
            let ctx = ui.ctx().clone();
            let canvas_layer = ui.layer_id();
            // Popups such as the colour picker are areas above the panel
            let canvas_on_top =
                |pos: Pos2| ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer);
            for event in events {
                let drawing = self.state.editor_state().is_drawing();
                if let Some(event) = canvas_event(&event, rect, drawing, canvas_on_top) {
                    self.input.handle_pointer(&mut self.state, event);
                }
            }
        }

        let mut surface = PainterSurface::new(&painter, rect, self.config.background());
        self.renderer.repaint(&mut surface, &self.state);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();
        let tools = self.state.tools();
        let history = self.state.history();

        ui.horizontal_wrapped(|ui| {
            let marker = tools.mode() == ToolMode::Stroke;
            if ui
                .selectable_label(marker && tools.thickness() == self.config.thin_thickness, "Thin Brush")
                .clicked()
            {
                actions.push(ButtonAction::SelectStroke {
                    thickness: self.config.thin_thickness,
                });
            }
            if ui
                .selectable_label(marker && tools.thickness() == self.config.thick_thickness, "Thick Brush")
                .clicked()
            {
                actions.push(ButtonAction::SelectStroke {
                    thickness: self.config.thick_thickness,
                });
            }

            if ui.button("Clear").clicked() {
                actions.push(ButtonAction::Clear);
            }
            if ui.add_enabled(history.can_undo(), egui::Button::new("Undo")).clicked() {
                actions.push(ButtonAction::Undo);
            }
            if ui.add_enabled(history.can_redo(), egui::Button::new("Redo")).clicked() {
                actions.push(ButtonAction::Redo);
            }
            if ui.button("Add Custom Sticker").clicked() {
                self.sticker_prompt = Some(STICKER_PROMPT_DEFAULT.to_owned());
            }
            let mut picked = tools.picker_color();
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut picked,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                actions.push(ButtonAction::SetColor(picked));
            }
        });

        ui.horizontal_wrapped(|ui| {
            for glyph in tools.catalog() {
                let selected = tools.active_glyph() == Some(glyph.as_str());
                if ui.selectable_label(selected, glyph.as_str()).clicked() {
                    actions.push(ButtonAction::SelectSticker {
                        glyph: glyph.clone(),
                    });
                }
            }
        });

        for action in actions {
            self.input.handle_action(&mut self.state, action);
        }

        if ui.button("Export as PNG").clicked() {
            self.export();
        }
        if let Some(status) = &self.status {
            ui.label(status.as_str());
        }
    }

    fn sticker_prompt(&mut self, ctx: &egui::Context) {
        let Some(text) = &mut self.sticker_prompt else {
            return;
        };

        let mut submitted = None;
        egui::Window::new("Add Custom Sticker")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Enter a new sticker emoji:");
                let edit = ui.text_edit_singleline(text);
                let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || enter {
                        submitted = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        submitted = Some(false);
                    }
                });
            });

        match submitted {
            Some(true) => {
                if let Some(glyph) = self.sticker_prompt.take() {
                    self.input
                        .handle_action(&mut self.state, ButtonAction::AddSticker { glyph });
                }
            }
            Some(false) => self.sticker_prompt = None,
            None => {}
        }
    }

    fn export(&mut self) {
        let path = &self.config.export_path;
        self.status = match self.renderer.export_png(self.state.committed(), path) {
            Ok(()) => Some(format!("Saved {}", path.display())),
            Err(err) => {
                warn!("Export failed: {err}");
                Some(format!("Export failed: {err}"))
            }
        };
    }
}

/// Map a raw egui event to canvas input. Presses count only inside `rect` and
/// where `on_top` says no other layer covers the canvas. Releases count
/// anywhere in the window.
fn canvas_event(
    event: &egui::Event,
    rect: Rect,
    drawing: bool,
    on_top: impl Fn(Pos2) -> bool,
) -> Option<InputEvent> {
    let local = |pos: Pos2| Pos2::ZERO + (pos - rect.min);
    match event {
        egui::Event::PointerMoved(pos) if drawing || rect.contains(*pos) => {
            Some(InputEvent::PointerMove { pos: local(*pos) })
        }
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            ..
        } if rect.contains(*pos) && on_top(*pos) => Some(InputEvent::PointerDown { pos: local(*pos) }),
        egui::Event::PointerButton {
            button: PointerButton::Primary,
            pressed: false,
            ..
        } => Some(InputEvent::PointerUp),
        _ => None,
    }
}

impl eframe::App for StickerPadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_NAME);
            self.canvas(ui);
            ui.separator();
            self.toolbar(ui);
        });

        self.sticker_prompt(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(256.0, 256.0))
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_press_on_canvas_is_local() {
        let event = canvas_event(&button(Pos2::new(110.0, 60.0), true), rect(), false, |_| true);
        assert_eq!(event, Some(InputEvent::PointerDown { pos: Pos2::new(10.0, 10.0) }));
    }

    #[test]
    fn test_press_under_popup_is_ignored() {
        // A colour-picker popup covers the right half of the canvas
        let popup = Rect::from_min_max(Pos2::new(228.0, 50.0), Pos2::new(356.0, 306.0));
        let on_top = |pos: Pos2| !popup.contains(pos);

        let covered = button(Pos2::new(300.0, 100.0), true);
        assert_eq!(canvas_event(&covered, rect(), false, on_top), None);

        let open = button(Pos2::new(150.0, 100.0), true);
        assert!(matches!(
            canvas_event(&open, rect(), false, on_top),
            Some(InputEvent::PointerDown { .. })
        ));
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let event = canvas_event(&button(Pos2::new(10.0, 10.0), true), rect(), false, |_| true);
        assert_eq!(event, None);
    }

    #[test]
    fn test_release_anywhere_ends_drag() {
        let event = canvas_event(&button(Pos2::new(900.0, 900.0), false), rect(), true, |_| false);
        assert_eq!(event, Some(InputEvent::PointerUp));
    }

    #[test]
    fn test_moves_outside_only_count_while_drawing() {
        let outside = egui::Event::PointerMoved(Pos2::new(400.0, 60.0));
        assert_eq!(canvas_event(&outside, rect(), false, |_| true), None);
        assert_eq!(
            canvas_event(&outside, rect(), true, |_| true),
            Some(InputEvent::PointerMove { pos: Pos2::new(300.0, 10.0) })
        );
    }
}
