use std::io;

use eframe::egui;
use log::info;

use super::{MaskEditorApp, MaskSink};
use crate::storage::file::FileStorage;
use crate::{BrushMode, BrushState};

pub fn run_native(mask_sink: MaskSink) -> Result<(), eframe::Error> {
    env_logger::init();

    let config: crate::config::Config = match std::fs::File::open("config.json") {
        Ok(f) => serde_json::from_reader(f).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Default::default(),
        Err(e) => Err(eframe::Error::AppCreation(Box::new(e)))?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    let image_dir = std::env::args().nth(1).unwrap_or_else(|| {
        config
            .image_dir
            .as_ref()
            .and_then(|s| Some(s.to_str()?.to_string()))
            .unwrap_or_else(|| ".".into())
    });

    info!("Run with config: {config:?}");
    let brush = BrushState::new(BrushMode::Paint, config.brush_diameter);
    eframe::run_native(
        "Mask Painter",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(MaskEditorApp::new(
                Box::new(FileStorage::new(image_dir)),
                brush,
                mask_sink,
            )))
        }),
    )
}
