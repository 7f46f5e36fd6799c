use std::io;

use egui::{
    self, Color32, ColorImage, ImageSource, InnerResponse, Sense, Stroke, TextureHandle,
    TextureOptions, Vec2, load::SizedTexture,
};
use log::{debug, error, info};

use crate::async_task::{AsyncRefTask, AsyncTask};
use crate::storage::{ImageData, ImageId, Storage};
use crate::{BrushState, ImageViewer, StrokeSession, ViewerInteraction};

mod image_selector;
mod menu;
#[cfg(not(target_arch = "wasm32"))]
mod native;
mod overlay;

use image_selector::ImageSelector;
#[cfg(not(target_arch = "wasm32"))]
pub use native::run_native;
use overlay::MaskOverlay;

/// Receives the full mask raster as a PNG data-URL after every gesture.
pub type MaskSink = Box<dyn FnMut(&str)>;

pub struct MaskEditorApp {
    storage: Box<dyn Storage>,
    selector: ImageSelector,
    viewer: ImageViewer,
    image_state: ImageState,
    brush: BrushState,
    session: Option<StrokeSession>,
    mask_sink: MaskSink,
    upload_job: AsyncRefTask<io::Result<()>>,
    export_error: Option<String>,
}

#[allow(clippy::large_enum_variant)]
enum ImageState {
    NotLoaded,
    Loading(AsyncTask<io::Result<ImageData>>),
    Loaded(LoadedImage),
    Error(String),
}

impl ImageState {
    fn sources(&mut self, ctx: &egui::Context) -> impl Iterator<Item = ImageSource<'static>> + '_ {
        match self {
            ImageState::Loaded(img) => itertools::Either::Left(
                std::iter::once(img.texture.1.clone())
                    .chain(std::iter::once(img.overlay.source(ctx))),
            ),
            _ => itertools::Either::Right(std::iter::empty()),
        }
    }

    fn update(&mut self, ctx: &egui::Context, image_id: &ImageId, storage: &dyn Storage) {
        match self {
            ImageState::NotLoaded => {
                *self = ImageState::Loading(AsyncTask::new(storage.load_image(image_id)))
            }
            ImageState::Loading(task) => {
                if let Some(result) = task.data() {
                    *self = match result
                        .map_err(|e| format!("IO Error: {e}"))
                        .and_then(|data| {
                            LoadedImage::from_data(data, ctx).map_err(|e| e.to_string())
                        }) {
                        Ok(loaded) => {
                            info!(
                                "Loaded image {:?} at {}x{}",
                                &*loaded.id,
                                loaded.size.x,
                                loaded.size.y
                            );
                            ImageState::Loaded(loaded)
                        }
                        Err(e) => ImageState::Error(e),
                    }
                }
            }
            ImageState::Loaded(_) | ImageState::Error(_) => {}
        }
    }
}

struct LoadedImage {
    id: ImageId,
    /// Native pixel dimensions; fixed for the lifetime of this state.
    size: Vec2,
    #[allow(
        dead_code,
        reason = "Acts as strong reference for SizedTexture. SizedTexture would not render an image if TextureHandle is dropped"
    )]
    texture: (TextureHandle, ImageSource<'static>),
    overlay: MaskOverlay,
}

impl LoadedImage {
    fn from_data(data: ImageData, ctx: &egui::Context) -> Result<Self, TextureExceedsLimit> {
        let (width, height) = data.image.dimensions();
        let max_texture_side = ctx.input(|i| i.max_texture_side);
        if width as usize > max_texture_side || height as usize > max_texture_side {
            return Err(TextureExceedsLimit {
                width,
                height,
                max_texture_side,
            });
        }

        let handle = ctx.load_texture(
            "source_image",
            ColorImage {
                size: [width as _, height as _],
                pixels: data
                    .image
                    .pixels()
                    .map(|p| Color32::from_rgb(p[0], p[1], p[2]))
                    .collect(),
            },
            TextureOptions {
                magnification: egui::TextureFilter::Nearest,
                ..Default::default()
            },
        );
        let source = ImageSource::Texture(SizedTexture::from_handle(&handle));

        Ok(Self {
            id: data.id,
            size: Vec2::new(width as f32, height as f32),
            texture: (handle, source),
            overlay: MaskOverlay::new(width, height),
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("image too large: {width}x{height}, max texture side is {max_texture_side}")]
struct TextureExceedsLimit {
    width: u32,
    height: u32,
    max_texture_side: usize,
}

impl MaskEditorApp {
    pub fn new(storage: Box<dyn Storage>, brush: BrushState, mask_sink: MaskSink) -> Self {
        let loader = Some(AsyncTask::new(storage.list_images()));
        Self {
            storage,
            selector: ImageSelector::new(loader),
            viewer: ImageViewer,
            image_state: ImageState::NotLoaded,
            brush,
            session: None,
            mask_sink,
            upload_job: AsyncRefTask::new_ready(Ok(())),
            export_error: None,
        }
    }

    fn handle_image_transition(&mut self, ctx: &egui::Context) {
        self.selector.update();
        if let Some(item) = self.selector.current() {
            let id = item.id.clone();
            self.image_state.update(ctx, &id, self.storage.as_ref());
        }
    }

    /// Drives the gesture state machine: pointer-down begins a disconnected
    /// sub-path, pointer-move chains segments, pointer-up (or leaving the
    /// canvas) finalizes and emits the raster to the mask sink.
    fn handle_paint(&mut self, response: &egui::Response, interaction: &ViewerInteraction) {
        let ImageState::Loaded(img) = &mut self.image_state else {
            return;
        };
        let width = self.brush.stroke_width(img.size);
        let transform = interaction.transform;

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.session = Some(StrokeSession::begin(transform.display_to_image(pos)));
            }
        } else if response.dragged() {
            if let (Some(session), Some(pos)) =
                (self.session.as_mut(), response.interact_pointer_pos())
            {
                session.extend_to(
                    transform.display_to_image(pos),
                    img.overlay.raster_mut(),
                    width,
                    self.brush.mode,
                );
            }
        }

        let pointer_left = response
            .interact_pointer_pos()
            .map(|pos| !response.rect.contains(pos))
            .unwrap_or(false);
        let gesture_ended =
            (response.drag_stopped() || pointer_left) && self.session.take().is_some();
        // A press without movement is a click, not a drag; the original
        // emitted after every gesture, changed pixels or not.
        if gesture_ended || response.clicked() {
            match img.overlay.raster().to_data_url() {
                Ok(data_url) => {
                    debug!("Gesture finished, emitting mask ({} bytes)", data_url.len());
                    (self.mask_sink)(&data_url);
                }
                Err(e) => error!("Failed to encode mask after gesture: {e}"),
            }
        }
    }

    fn draw_brush_preview(&self, ui: &egui::Ui, response: &egui::Response, interaction: &ViewerInteraction) {
        let ImageState::Loaded(img) = &self.image_state else {
            return;
        };
        if let Some(hover) = response.hover_pos() {
            let radius =
                self.brush.stroke_width(img.size) * 0.5 / interaction.transform.line_width_scale();
            ui.painter()
                .circle_stroke(hover, radius, Stroke::new(1.0, Color32::WHITE));
        }
    }
}

impl eframe::App for MaskEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Inpainting mask painter");
            self.menu_ui(ui);
            self.handle_image_transition(ui.ctx());

            if let InnerResponse {
                inner: Some(interaction),
                response,
            } = ui.reserve_bottom_space(40.0, |ui| {
                self.viewer
                    .ui(ui, self.image_state.sources(ui.ctx()), Some(Sense::click()))
            }) {
                self.handle_paint(&response, &interaction);
                self.draw_brush_preview(ui, &response, &interaction);
                if let Some(pos) = interaction.cursor_image_pos {
                    ui.label(format!("Pixel coordinates: ({:.0}, {:.0})", pos.x, pos.y));
                }
            } else if let ImageState::Error(e) = &self.image_state {
                ui.label(format!("Error: {e}"));
            }
        });
    }
}

trait UiExt {
    fn reserve_bottom_space<T>(&mut self, size: f32, inner: impl FnOnce(&mut egui::Ui) -> T) -> T;
}

impl UiExt for egui::Ui {
    fn reserve_bottom_space<T>(&mut self, size: f32, inner: impl FnOnce(&mut egui::Ui) -> T) -> T {
        let mut available = self.available_rect_before_wrap();
        available.max.y = (available.max.y - size).max(0.0);

        self.allocate_new_ui(egui::UiBuilder::new().max_rect(available), inner)
            .inner
    }
}
