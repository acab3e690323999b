use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::command::Command;
use crate::config::Config;
use crate::error::Result;
use crate::state::AppState;
use crate::surface::{GlyphSet, RasterSurface, Surface};

/// Replays committed commands onto a surface, live or for export
#[derive(Debug)]
pub struct Renderer {
    canvas_width: u32,
    canvas_height: u32,
    export_scale: u32,
    glyphs: GlyphSet,
}

impl Renderer {
    /// Fails when the configuration is unusable or no glyph font can be loaded;
    /// there is no point drawing without them.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            export_scale: config.export_scale,
            glyphs: GlyphSet::from_default_fonts()?,
        })
    }

    /// Clear and replay the history oldest first, then overlay the tool
    /// preview unless a drag is in progress.
    pub fn repaint(&self, surface: &mut dyn Surface, state: &AppState) {
        replay(surface, state.committed());
        if let Some(preview) = state.visible_preview() {
            preview.render(surface);
        }
    }

    /// A fresh canvas-sized raster surface at `scale`
    pub fn raster_surface(&self, scale: u32) -> Result<RasterSurface<'_>> {
        RasterSurface::new(self.canvas_width, self.canvas_height, scale, &self.glyphs)
    }

    /// Render `commands` onto a new surface enlarged by the export scale
    pub fn export(&self, commands: &[Command]) -> Result<RgbaImage> {
        let mut surface = self.raster_surface(self.export_scale)?;
        replay(&mut surface, commands);
        Ok(surface.into_image())
    }

    pub fn export_png(&self, commands: &[Command], path: &Path) -> Result<()> {
        let raster = self.export(commands)?;
        raster.save_with_format(path, image::ImageFormat::Png)?;
        info!(
            "Exported {} commands to {} ({}x{})",
            commands.len(),
            path.display(),
            raster.width(),
            raster.height()
        );
        Ok(())
    }
}

fn replay(surface: &mut dyn Surface, commands: &[Command]) {
    surface.clear();
    for command in commands {
        command.render(surface);
    }
}
