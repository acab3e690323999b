use thiserror::Error;

/// Errors that can occur while setting up or exporting a drawing
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot create a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("Failed to load glyph font: {0}")]
    Font(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No rendering context available for the canvas")]
    NoRenderContext,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
