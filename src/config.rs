use std::{fs, path::Path, path::PathBuf};

use egui::Color32;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Canvas and tool settings. Every field is optional in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Uniform scale factor applied when exporting to PNG
    pub export_scale: u32,
    pub thin_thickness: f32,
    pub thick_thickness: f32,
    /// Initial colour-picker value as `[r, g, b]`
    pub default_color: [u8; 3],
    /// Backdrop painted behind the live canvas
    pub background: [u8; 3],
    pub stickers: Vec<String>,
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            export_scale: 4,
            thin_thickness: 1.0,
            thick_thickness: 5.0,
            default_color: [0, 0, 0],
            background: [255, 255, 255],
            stickers: vec!["🐱".to_owned(), "🌟".to_owned(), "🫠".to_owned()],
            export_path: PathBuf::from("drawing.png"),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::Config(format!(
                "canvas must not be empty (got {}x{})",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.export_scale == 0 {
            return Err(Error::Config("export_scale must be at least 1".to_owned()));
        }
        if self.export_size().is_none() {
            return Err(Error::Config(format!(
                "export size {}x{} at scale {} does not fit in u32",
                self.canvas_width, self.canvas_height, self.export_scale
            )));
        }
        for (name, thickness) in [("thin_thickness", self.thin_thickness), ("thick_thickness", self.thick_thickness)] {
            if !(thickness.is_finite() && thickness > 0.0) {
                return Err(Error::Config(format!("{name} must be positive (got {thickness})")));
            }
        }
        Ok(())
    }

    /// Pixel size of the exported raster, `None` on overflow
    pub fn export_size(&self) -> Option<(u32, u32)> {
        Some((
            self.canvas_width.checked_mul(self.export_scale)?,
            self.canvas_height.checked_mul(self.export_scale)?,
        ))
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn default_color(&self) -> Color32 {
        let [r, g, b] = self.default_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn background(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_canvas() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_size(), Some((1024, 1024)));
        assert_eq!(config.stickers.len(), 3);
        assert_eq!(config.default_color(), Color32::BLACK);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "export_scale": 2, "stickers": ["A"] }"#).unwrap();
        assert_eq!(config.export_scale, 2);
        assert_eq!(config.stickers, vec!["A".to_owned()]);
        assert_eq!(config.canvas_width, 256);
        assert_eq!(config.thick_thickness, 5.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::from_json(r#"{ "canvas_width": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "export_scale": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "thin_thickness": -1.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "canvas_width": 4294967295, "export_scale": 4 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_json("not json"), Err(Error::Json(_))));
    }
}
