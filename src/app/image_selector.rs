use std::io;

use egui::{self, ComboBox, Key};
use log::info;

use crate::async_task::AsyncTask;
use crate::storage::{ImageListItem, Storage};

const ICON_RELOAD: &str = "\u{21BB}";
const ICON_PREV: &str = "\u{23F4}";
const ICON_NEXT: &str = "\u{23F5}";

type ImageListTask = AsyncTask<io::Result<Vec<ImageListItem>>>;

/// Picks the current image from the storage listing. Selecting a different
/// entry replaces the whole editing session.
pub(crate) struct ImageSelector {
    idx: usize,
    values: io::Result<Vec<ImageListItem>>,
    loader: Option<ImageListTask>,
    pending: bool,
}

impl ImageSelector {
    pub fn new(loader: Option<ImageListTask>) -> Self {
        Self {
            idx: 0,
            values: Ok(Vec::new()),
            loader,
            pending: false,
        }
    }

    pub fn update(&mut self) {
        if let Some(loader) = self.loader.as_mut() {
            if let Some(values) = loader.data() {
                info!("Listed {:?} images", values.as_ref().map(|x| x.len()));
                self.loader = None;
                self.pending = matches!(&values, Ok(v) if !v.is_empty());
                self.idx = 0;
                self.values = values;
            }
        }
    }

    pub fn current(&self) -> Option<&ImageListItem> {
        self.values.as_ref().ok()?.get(self.idx)
    }

    /// Returns true when the selection changed and the image state must be
    /// reloaded.
    pub fn ui(&mut self, storage: &dyn Storage, ui: &mut egui::Ui) -> bool {
        let mut changed = std::mem::take(&mut self.pending);

        match &self.values {
            Err(e) => {
                ui.label(format!("{e}"));
            }
            Ok(items) => {
                if !items.is_empty() {
                    if ui.button(ICON_PREV).on_hover_text("Previous (ArrowLeft)").clicked()
                        || ui.input(|i| i.key_pressed(Key::ArrowLeft)) && ui.is_enabled()
                    {
                        self.idx = self.idx.checked_sub(1).unwrap_or(items.len() - 1);
                        changed = true;
                    }
                }

                if ComboBox::from_id_salt("image_selector")
                    .show_index(ui, &mut self.idx, items.len(), |i| {
                        items.get(i).map(|x| x.name.as_str()).unwrap_or("")
                    })
                    .changed()
                {
                    changed = true;
                }

                if !items.is_empty()
                    && (ui.button(ICON_NEXT).on_hover_text("Next (ArrowRight)").clicked()
                        || ui.input(|i| i.key_pressed(Key::ArrowRight)) && ui.is_enabled())
                {
                    self.idx = (self.idx + 1) % items.len();
                    changed = true;
                }
            }
        }

        if ui.button(ICON_RELOAD).on_hover_text("Reload files").clicked() {
            self.loader = Some(AsyncTask::new(storage.list_images()));
        }

        changed && self.current().is_some()
    }
}
