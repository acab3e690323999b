mod history;

use egui::Pos2;
use uuid::Uuid;

use crate::sticker::Sticker;
use crate::stroke::Stroke;
use crate::surface::Surface;

pub use history::CommandHistory;

/// Stable identity of a command, kept across undo and redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(Uuid);

impl CommandId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single undoable drawing action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl Command {
    pub fn id(&self) -> CommandId {
        match self {
            Command::Stroke(stroke) => stroke.id(),
            Command::Sticker(sticker) => sticker.id(),
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Stroke(_) => "stroke",
            Command::Sticker(_) => "sticker",
        }
    }

    /// Feed a new pointer position into the command.
    ///
    /// Strokes grow by one point, stickers move to the position.
    pub fn extend(&mut self, point: Pos2) {
        match self {
            Command::Stroke(stroke) => stroke.add_point(point),
            Command::Sticker(sticker) => sticker.move_to(point),
        }
    }

    /// Draw with the command's own style, independent of the current tool
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Command::Stroke(stroke) => stroke.draw(surface),
            Command::Sticker(sticker) => sticker.draw(surface),
        }
    }
}

impl From<Stroke> for Command {
    fn from(stroke: Stroke) -> Self {
        Command::Stroke(stroke)
    }
}

impl From<Sticker> for Command {
    fn from(sticker: Sticker) -> Self {
        Command::Sticker(sticker)
    }
}
