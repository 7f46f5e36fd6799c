use egui::{
    self, Color32, ColorImage, ImageSource, TextureHandle, TextureOptions, load::SizedTexture,
};

use crate::MaskRaster;

/// Owns the editing session's paint layer and mirrors it into a texture for
/// on-screen display. The texture is rebuilt lazily, only in frames after the
/// raster changed.
pub struct MaskOverlay {
    raster: MaskRaster,
    texture: Option<(TextureHandle, ImageSource<'static>)>,
    dirty: bool,
}

impl MaskOverlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: MaskRaster::new(width, height),
            texture: None,
            dirty: false,
        }
    }

    pub fn raster(&self) -> &MaskRaster {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut MaskRaster {
        self.dirty = true;
        &mut self.raster
    }

    pub fn clear(&mut self) {
        self.raster.clear();
        self.dirty = true;
    }

    pub fn source(&mut self, ctx: &egui::Context) -> ImageSource<'static> {
        if self.texture.is_none() || self.dirty {
            self.dirty = false;

            let pixels = self
                .raster
                .as_image()
                .pixels()
                .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
                .collect();
            let handle = ctx.load_texture(
                "mask_overlay",
                ColorImage {
                    size: [self.raster.width() as _, self.raster.height() as _],
                    pixels,
                },
                TextureOptions {
                    magnification: egui::TextureFilter::Nearest,
                    ..Default::default()
                },
            );
            let source = ImageSource::Texture(SizedTexture::from_handle(&handle));
            self.texture = Some((handle, source));
        }

        let (_, source) = self.texture.as_ref().expect("rebuilt above");
        source.clone()
    }
}
