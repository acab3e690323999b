use crate::command::{Command, CommandHistory, CommandId};
use crate::config::Config;
use crate::preview::{Preview, PreviewAgent};
use crate::tools::ToolState;

/// Whether a pointer drag is currently feeding a command
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Drawing {
        /// The committed command that pointer moves extend
        active: CommandId,
    },
}

impl EditorState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn active_command(&self) -> Option<CommandId> {
        match self {
            Self::Drawing { active } => Some(*active),
            Self::Idle => None,
        }
    }
}

/// Everything the canvas knows. Only [`crate::InputController`] mutates it.
#[derive(Debug)]
pub struct AppState {
    pub(crate) tools: ToolState,
    pub(crate) history: CommandHistory,
    pub(crate) preview: PreviewAgent,
    pub(crate) editor: EditorState,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tools: ToolState::from_config(config),
            history: CommandHistory::new(),
            preview: PreviewAgent::new(),
            editor: EditorState::Idle,
        }
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn editor_state(&self) -> EditorState {
        self.editor
    }

    /// Commands to replay, oldest first
    pub fn committed(&self) -> &[Command] {
        self.history.committed()
    }

    /// The preview to overlay, hidden while a drag is in progress
    pub fn visible_preview(&self) -> Option<&Preview> {
        if self.editor.is_drawing() {
            None
        } else {
            self.preview.current()
        }
    }
}
