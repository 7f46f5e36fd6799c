use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::{ExportError, MaskRaster};

/// Global brightness threshold: pixels whose RGB mean exceeds this become
/// white, everything else black.
pub const BINARIZE_THRESHOLD: u16 = 128;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Copies the painted layer into a strict two-level mask: every output pixel
/// is pure black or pure white and fully opaque, regardless of the source
/// alpha. No dithering, no local adaptivity.
pub fn binarize(source: &RgbaImage) -> RgbaImage {
    let mut mask = RgbaImage::new(source.width(), source.height());
    for (src, dst) in source.pixels().zip(mask.pixels_mut()) {
        let brightness = (src[0] as u16 + src[1] as u16 + src[2] as u16) / 3;
        *dst = if brightness > BINARIZE_THRESHOLD {
            WHITE
        } else {
            BLACK
        };
    }
    mask
}

/// Binarizes the raster and encodes the result as a PNG (`image/png`, same
/// dimensions as the source image). Runs synchronously; the caller hands the
/// bytes to the upload collaborator.
pub fn encode_binary_mask(raster: &MaskRaster) -> Result<Vec<u8>, ExportError> {
    if raster.is_empty() {
        return Err(ExportError::EmptyRaster);
    }
    let mask = binarize(raster.as_image());
    let mut bytes = Cursor::new(Vec::new());
    mask.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::BrushMode;

    #[test]
    fn output_is_strictly_black_or_white_and_opaque() {
        let mut raster = MaskRaster::new(40, 30);
        raster.stroke_segment(
            Pos2::new(5.0, 15.0),
            Pos2::new(35.0, 15.0),
            8.0,
            BrushMode::Paint,
        );
        let mask = binarize(raster.as_image());
        assert!(mask.pixels().all(|p| *p == WHITE || *p == BLACK));
    }

    #[test]
    fn painted_region_becomes_white_background_black() {
        let mut raster = MaskRaster::new(40, 30);
        raster.stroke_segment(
            Pos2::new(5.0, 15.0),
            Pos2::new(35.0, 15.0),
            8.0,
            BrushMode::Paint,
        );
        let mask = binarize(raster.as_image());
        assert_eq!(*mask.get_pixel(20, 15), WHITE);
        assert_eq!(*mask.get_pixel(20, 2), BLACK);
    }

    #[test]
    fn binarize_is_idempotent() {
        let mut raster = MaskRaster::new(24, 24);
        raster.stroke_segment(
            Pos2::new(2.0, 2.0),
            Pos2::new(20.0, 20.0),
            5.0,
            BrushMode::Paint,
        );
        let once = binarize(raster.as_image());
        let twice = binarize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn brightness_must_exceed_the_threshold() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([128, 128, 128, 0]));
        source.put_pixel(1, 0, Rgba([129, 129, 129, 0]));
        let mask = binarize(&source);
        assert_eq!(*mask.get_pixel(0, 0), BLACK);
        assert_eq!(*mask.get_pixel(1, 0), WHITE);
    }

    #[test]
    fn encoded_mask_keeps_the_source_dimensions() {
        let mut raster = MaskRaster::new(16, 9);
        raster.stroke_segment(
            Pos2::new(3.0, 4.0),
            Pos2::new(12.0, 4.0),
            4.0,
            BrushMode::Paint,
        );
        let png = encode_binary_mask(&raster).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 9));
        assert_eq!(decoded, binarize(raster.as_image()));
    }

    #[test]
    fn empty_raster_is_an_explicit_error() {
        let raster = MaskRaster::new(0, 0);
        assert!(matches!(
            encode_binary_mask(&raster),
            Err(ExportError::EmptyRaster)
        ));
    }
}
