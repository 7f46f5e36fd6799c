use std::io::Cursor;

use base64::Engine;
use egui::{Pos2, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::BrushMode;

/// Semi-opaque white, so the painted region stays visible over the image while
/// keeping full white in the color channels for the binarizer.
const PAINT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 128]);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mask raster has no pixels")]
    EmptyRaster,
    #[error("failed to encode mask as PNG: {0}")]
    Encoding(#[from] image::ImageError),
}

/// Off-screen paint layer at the source image's native resolution. Strokes are
/// rasterized immediately; there is no retained stroke geometry.
pub struct MaskRaster {
    pixels: RgbaImage,
}

impl MaskRaster {
    /// Fully transparent raster of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Rasterize one stroke segment between two image-space points as a
    /// capsule of the given width: every pixel whose center lies within
    /// `width / 2` of the segment is composited once. The capsule shape gives
    /// round caps and round joins for chained segments.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, mode: BrushMode) {
        if self.is_empty() || width <= 0.0 {
            return;
        }
        let radius = width * 0.5;
        let radius_sq = radius * radius;

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as u32;
        let max_x = ((from.x.max(to.x) + radius).ceil() as i64)
            .clamp(0, self.pixels.width() as i64) as u32;
        let max_y = ((from.y.max(to.y) + radius).ceil() as i64)
            .clamp(0, self.pixels.height() as i64) as u32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    mode.composite(self.pixels.get_pixel_mut(x, y));
                }
            }
        }
    }

    /// Lossless, alpha-preserving encoding of the current paint layer.
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        if self.is_empty() {
            return Err(ExportError::EmptyRaster);
        }
        let mut bytes = Cursor::new(Vec::new());
        self.pixels.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Self-contained `data:image/png;base64,…` form of [`Self::to_png`],
    /// handed to the mask-changed sink after every gesture.
    pub fn to_data_url(&self) -> Result<String, ExportError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.to_png()?);
        Ok(format!("data:image/png;base64,{encoded}"))
    }
}

impl BrushMode {
    fn composite(self, dst: &mut Rgba<u8>) {
        match self {
            BrushMode::Paint => *dst = source_over(PAINT_COLOR, *dst),
            // destination-out with an opaque eraser removes everything.
            BrushMode::Erase => *dst = Rgba([0, 0, 0, 0]),
        }
    }
}

/// Source-over blend of straight-alpha colors.
fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let blend = |s: u8, d: u8| {
        ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

fn distance_sq_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    let t = if length_sq <= f32::EPSILON {
        0.0
    } else {
        ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0)
    };
    (point - (a + ab * t)).length_sq()
}
