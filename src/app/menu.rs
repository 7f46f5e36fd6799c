use egui::Key;

use crate::binarize::encode_binary_mask;
use crate::brush::{BrushMode, MAX_BRUSH_DIAMETER, MIN_BRUSH_DIAMETER};
use crate::async_task::AsyncRefTask;

use super::{ImageState, MaskEditorApp};

const ICON_PAINT: &str = "\u{1F58C}";
const ICON_ERASE: &str = "\u{232B}";
const ICON_UPLOAD: &str = "\u{1F4BE}";

impl MaskEditorApp {
    pub(super) fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.selector.ui(&*self.storage, ui) {
                // A new image replaces the session wholesale, even mid-stroke.
                self.image_state = ImageState::NotLoaded;
                self.session = None;
                self.export_error = None;
            }

            ui.separator();

            ui.selectable_value(&mut self.brush.mode, BrushMode::Paint, ICON_PAINT)
                .on_hover_text("Paint (B)");
            ui.selectable_value(&mut self.brush.mode, BrushMode::Erase, ICON_ERASE)
                .on_hover_text("Erase (E)");
            ui.input(|i| {
                if i.key_pressed(Key::B) {
                    self.brush.mode = BrushMode::Paint;
                }
                if i.key_pressed(Key::E) {
                    self.brush.mode = BrushMode::Erase;
                }
            });
            ui.add(
                egui::Slider::new(
                    &mut self.brush.diameter,
                    MIN_BRUSH_DIAMETER..=MAX_BRUSH_DIAMETER,
                )
                .text("Brush"),
            );

            ui.separator();

            if let (Some(last_upload), ImageState::Loaded(img)) =
                (self.upload_job.data(), &mut self.image_state)
            {
                if let Err(e) = last_upload {
                    ui.label(format!("Error during upload: {e}"));
                }

                if ui.button("Clear").on_hover_text("Discard the mask").clicked() {
                    img.overlay.clear();
                }

                if ui
                    .button(ICON_UPLOAD)
                    .on_hover_text("Binarize and upload the mask")
                    .clicked()
                {
                    match encode_binary_mask(img.overlay.raster()) {
                        Ok(mask_png) => {
                            self.export_error = None;
                            self.upload_job = AsyncRefTask::new(
                                self.storage.store_mask(img.id.clone(), mask_png),
                            );
                        }
                        Err(e) => self.export_error = Some(e.to_string()),
                    }
                }
            }

            if let Some(e) = &self.export_error {
                ui.label(format!("Export failed: {e}"));
            }
        });
    }
}
