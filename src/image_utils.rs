use image::{Rgba, RgbaImage};

/// Decodes image bytes into an RGBA buffer. Decode failures surface as
/// `InvalidData` so the caller can display them instead of silently keeping
/// painting disabled.
pub fn load_image(bytes: &[u8]) -> std::io::Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        .to_rgba8())
}

/// Generated demo image for the in-memory storage.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([90, 90, 110, 255])
        } else {
            Rgba([200, 200, 215, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bytes_report_an_explicit_decode_error() {
        let err = load_image(b"not an image").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn png_round_trip_reports_native_dimensions() {
        let board = checkerboard(32, 20, 4);
        let mut bytes = std::io::Cursor::new(Vec::new());
        board.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        let loaded = load_image(&bytes.into_inner()).unwrap();
        assert_eq!(loaded.dimensions(), (32, 20));
    }
}
