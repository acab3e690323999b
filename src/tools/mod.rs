use egui::{Color32, Pos2};
use log::{info, warn};
use uuid::Uuid;

use crate::command::Command;
use crate::config::Config;
use crate::sticker::Sticker;
use crate::stroke::Stroke;

/// Which kind of command the next pointer-down creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    Stroke,
    Sticker,
}

/// The active tool configuration plus the sticker catalog
#[derive(Debug, Clone)]
pub struct ToolState {
    mode: ToolMode,
    thickness: f32,
    /// Colour captured when the tool was selected
    color: Color32,
    /// Live colour-picker value, only read at selection time
    picker_color: Color32,
    rotation_degrees: f32,
    active_glyph: Option<String>,
    catalog: Vec<String>,
}

impl ToolState {
    pub fn new(thickness: f32, color: Color32, catalog: Vec<String>) -> Self {
        Self {
            mode: ToolMode::Stroke,
            thickness,
            color,
            picker_color: color,
            rotation_degrees: 0.0,
            active_glyph: None,
            catalog,
        }
    }

    /// Thin marker in the default colour with the configured catalog
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thin_thickness, config.default_color(), config.stickers.clone())
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn picker_color(&self) -> Color32 {
        self.picker_color
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn active_glyph(&self) -> Option<&str> {
        self.active_glyph.as_deref()
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Update the colour picker. Takes effect on the next tool selection.
    pub fn set_picker_color(&mut self, color: Color32) {
        self.picker_color = color;
    }

    pub fn select_stroke(&mut self, thickness: f32) {
        self.mode = ToolMode::Stroke;
        self.thickness = thickness;
        self.color = self.picker_color;
        self.active_glyph = None;
        info!("Selected marker, thickness {thickness}");
    }

    /// Select a sticker with a freshly drawn random rotation
    pub fn select_sticker(&mut self, glyph: &str) {
        self.select_sticker_with_rotation(glyph, random_rotation());
    }

    pub fn select_sticker_with_rotation(&mut self, glyph: &str, rotation_degrees: f32) {
        self.mode = ToolMode::Sticker;
        self.active_glyph = Some(glyph.to_owned());
        self.rotation_degrees = rotation_degrees.rem_euclid(360.0);
        self.color = self.picker_color;
        info!("Selected sticker {glyph} at {}°", self.rotation_degrees);
    }

    /// Append a custom sticker. Blank input is ignored; returns whether the catalog grew.
    pub fn add_to_catalog(&mut self, glyph: &str) -> bool {
        if glyph.trim().is_empty() {
            warn!("Ignoring blank custom sticker");
            return false;
        }
        info!("Added sticker {glyph} to catalog");
        self.catalog.push(glyph.to_owned());
        true
    }

    /// Build the command a pointer-down at `pos` starts
    pub fn new_command(&self, pos: Pos2) -> Command {
        match (self.mode, &self.active_glyph) {
            (ToolMode::Sticker, Some(glyph)) => {
                Sticker::new(pos, glyph.clone(), self.rotation_degrees, self.color).into()
            }
            _ => Stroke::begin(pos, self.thickness, self.color).into(),
        }
    }
}

/// Whole degrees in `0..360`, drawn from the random bits of a v4 UUID
fn random_rotation() -> f32 {
    (Uuid::new_v4().as_u128() % 360) as f32
}
