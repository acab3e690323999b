#![warn(clippy::all, rust_2018_idioms)]

use std::env;

use sticker_pad::{APP_NAME, Config, StickerPadApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match env::args_os().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let canvas = config.canvas_size();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([canvas.x.max(480.0) + 40.0, canvas.y + 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(StickerPadApp::new(cc, config)?))),
    )?;
    Ok(())
}
