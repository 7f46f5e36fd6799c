use egui::{
    self, Color32, ImageSource, InnerResponse, Pos2, Rect, Sense, TextureOptions, Vec2,
    load::{SizedTexture, TexturePoll},
};

use crate::ContainTransform;

/// Renders the image plus overlay textures with contain fitting and reports
/// where the pointer sits in image space. No zoom or pan: the whole image is
/// always visible, letterboxed on one axis when the aspects differ.
#[derive(Default)]
pub struct ImageViewer;

pub struct ViewerInteraction {
    pub image_size: Vec2,
    pub transform: ContainTransform,
    /// Pointer position in image-space pixels, present while hovering or
    /// dragging. May lie outside the image bounds when the pointer is over a
    /// letterbox band; the raster clips such strokes.
    pub cursor_image_pos: Option<Pos2>,
}

impl ImageViewer {
    pub fn ui(
        &self,
        ui: &mut egui::Ui,
        sources: impl Iterator<Item = ImageSource<'static>>,
        sense: Option<Sense>,
    ) -> InnerResponse<Option<ViewerInteraction>> {
        let viewport_rect = ui.available_rect_before_wrap();
        let available_size = ui.available_size();

        let mut iter = sources.map(|source| {
            egui::Image::new(source)
                .maintain_aspect_ratio(true)
                // Important for Texture-ImageSources
                .fit_to_exact_size(available_size)
                .texture_options(TextureOptions {
                    magnification: egui::TextureFilter::Nearest,
                    ..Default::default()
                })
        });

        fn next_loaded(
            iter: impl Iterator<Item = egui::Image<'static>>,
            ui: &egui::Ui,
        ) -> Option<SizedTexture> {
            iter.filter_map(|image| {
                match image.load_for_size(ui.ctx(), ui.available_size()) {
                    Ok(TexturePoll::Ready { texture }) => Some(texture),
                    _ => None,
                }
            })
            .next()
        }

        let Some(first_texture) = next_loaded(&mut iter, ui) else {
            return InnerResponse {
                inner: None,
                response: ui.response(),
            };
        };
        let image_size = first_texture.size;

        let paint_sense = Sense::hover().union(Sense::drag());
        let combined_sense = sense.map(|s| s.union(paint_sense)).unwrap_or(paint_sense);
        let response = ui.allocate_rect(viewport_rect, combined_sense);

        let Some(transform) = ContainTransform::compute(viewport_rect, image_size) else {
            // Not laid out yet; skip drawing and interaction this frame.
            return InnerResponse {
                inner: None,
                response,
            };
        };

        let painter = ui.painter().with_clip_rect(viewport_rect);
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        let image_rect = transform.image_rect();

        painter.image(first_texture.id, image_rect, uv, Color32::WHITE);
        while let Some(texture) = next_loaded(&mut iter, ui) {
            painter.image(texture.id, image_rect, uv, Color32::WHITE);
        }

        let cursor_image_pos = response
            .hover_pos()
            .or_else(|| response.interact_pointer_pos())
            .map(|pos| transform.display_to_image(pos));

        InnerResponse {
            inner: Some(ViewerInteraction {
                image_size,
                transform,
                cursor_image_pos,
            }),
            response,
        }
    }
}
