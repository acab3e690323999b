use log::info;

use super::{Command, CommandId};

/// Manages the history of committed commands for undo/redo
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Commands currently on the canvas, oldest first
    undo_stack: Vec<Command>,
    /// Commands taken back by undo, most recently undone last
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a command. Any redo history is dropped.
    pub fn commit(&mut self, command: Command) {
        info!("Committed {} {}", command.kind(), command.id());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Move the newest command to the redo stack. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(command) => {
                info!("Undo {} {}", command.kind(), command.id());
                self.redo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone command back. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(command) => {
                info!("Redo {} {}", command.kind(), command.id());
                self.undo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Drop everything, including redo history
    pub fn clear(&mut self) {
        info!(
            "Cleared {} committed and {} undone commands",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Find a command by id wherever it currently lives
    pub fn get_mut(&mut self, id: CommandId) -> Option<&mut Command> {
        self.undo_stack
            .iter_mut()
            .chain(self.redo_stack.iter_mut())
            .rev()
            .find(|command| command.id() == id)
    }

    pub fn committed(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_buffer(&self) -> &[Command] {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
