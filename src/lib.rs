mod app;
mod async_task;
mod binarize;
mod brush;
mod config;
mod contain;
mod image_utils;
mod raster;
mod storage;
mod stroke;
mod viewer;

pub use app::{MaskEditorApp, MaskSink};
#[cfg(not(target_arch = "wasm32"))]
pub use app::run_native;
pub use async_task::{AsyncRefTask, AsyncTask, BoxFuture};
pub use binarize::{binarize, encode_binary_mask, BINARIZE_THRESHOLD};
pub use brush::{
    BrushMode, BrushState, MAX_BRUSH_DIAMETER, MIN_BRUSH_DIAMETER, REFERENCE_DISPLAY_SIZE,
};
pub use config::Config;
pub use contain::ContainTransform;
pub use image_utils::{checkerboard, load_image};
pub use raster::{ExportError, MaskRaster};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::file::FileStorage;
pub use storage::{in_memory::InMemoryStorage, ImageData, ImageId, ImageListItem, Storage};
pub use stroke::StrokeSession;
pub use viewer::{ImageViewer, ViewerInteraction};
