use egui::{Color32, Pos2};
use log::debug;

use crate::state::{AppState, EditorState};

/// Pointer input in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved, with or without the button held
    PointerMove { pos: Pos2 },
    /// Primary button released anywhere in the window
    PointerUp,
}

/// Toolbar actions. None of them change whether a drag is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    Clear,
    Undo,
    Redo,
    SelectStroke { thickness: f32 },
    SelectSticker { glyph: String },
    AddSticker { glyph: String },
    SetColor(Color32),
}

/// Turns input into state transitions and repaint requests
#[derive(Default)]
pub struct InputController {
    repaint: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for InputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputController")
            .field("has_repaint_hook", &self.repaint.is_some())
            .finish()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback run whenever the canvas needs repainting
    pub fn with_repaint_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.repaint = Some(Box::new(hook));
        self
    }

    fn request_repaint(&mut self) {
        if let Some(hook) = &mut self.repaint {
            hook();
        }
    }

    pub fn handle_pointer(&mut self, state: &mut AppState, event: InputEvent) {
        match (state.editor, event) {
            (_, InputEvent::PointerDown { pos }) => {
                // Committed right away so the command shows and can be undone mid-drag
                let command = state.tools.new_command(pos);
                let active = command.id();
                state.history.commit(command);
                state.preview.invalidate();
                state.editor = EditorState::Drawing { active };
                self.request_repaint();
            }
            (EditorState::Drawing { active }, InputEvent::PointerMove { pos }) => {
                // The command may have been undone or cleared since the drag began
                match state.history.get_mut(active) {
                    Some(command) => command.extend(pos),
                    None => debug!("Active command {active} is gone, ignoring move"),
                }
                self.request_repaint();
            }
            (EditorState::Idle, InputEvent::PointerMove { pos }) => {
                state.preview.track(&state.tools, pos);
                self.request_repaint();
            }
            (EditorState::Drawing { active }, InputEvent::PointerUp) => {
                debug!("Finished command {active}");
                state.editor = EditorState::Idle;
            }
            (EditorState::Idle, InputEvent::PointerUp) => {}
        }
    }

    pub fn handle_action(&mut self, state: &mut AppState, action: ButtonAction) {
        match action {
            ButtonAction::Clear => {
                state.history.clear();
                self.request_repaint();
            }
            ButtonAction::Undo => {
                if state.history.undo() {
                    self.request_repaint();
                }
            }
            ButtonAction::Redo => {
                if state.history.redo() {
                    self.request_repaint();
                }
            }
            ButtonAction::SelectStroke { thickness } => {
                state.tools.select_stroke(thickness);
                self.tool_changed(state);
            }
            ButtonAction::SelectSticker { glyph } => {
                state.tools.select_sticker(&glyph);
                self.tool_changed(state);
            }
            ButtonAction::AddSticker { glyph } => {
                if state.tools.add_to_catalog(&glyph) {
                    self.tool_changed(state);
                }
            }
            ButtonAction::SetColor(color) => {
                state.tools.set_picker_color(color);
                self.tool_changed(state);
            }
        }
    }

    /// A stale preview must never be drawn with the old tool
    fn tool_changed(&mut self, state: &mut AppState) {
        state.preview.invalidate();
        self.request_repaint();
    }
}
