#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod preview;
pub mod renderer;
pub mod state;
pub mod sticker;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::{APP_NAME, StickerPadApp};
pub use command::{Command, CommandHistory, CommandId};
pub use config::Config;
pub use error::{Error, Result};
pub use input::{ButtonAction, InputController, InputEvent};
pub use preview::{Preview, PreviewAgent};
pub use renderer::Renderer;
pub use state::{AppState, EditorState};
pub use sticker::Sticker;
pub use stroke::Stroke;
pub use surface::{GlyphSet, PainterSurface, RasterSurface, Surface};
pub use tools::{ToolMode, ToolState};
