use egui::Pos2;

use crate::{BrushMode, MaskRaster};

/// One continuous pointer-down-to-pointer-up gesture. Each gesture owns its
/// own path start, so strokes never connect to the previous gesture's end
/// point. Dropped when the pointer is released or leaves the canvas.
pub struct StrokeSession {
    last: Pos2,
}

impl StrokeSession {
    pub fn begin(at: Pos2) -> Self {
        Self { last: at }
    }

    /// Draws a segment from the previous point to `to` and moves the path
    /// cursor there, so consecutive segments chain smoothly.
    pub fn extend_to(&mut self, to: Pos2, raster: &mut MaskRaster, width: f32, mode: BrushMode) {
        raster.stroke_segment(self.last, to, width, mode);
        self.last = to;
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_chain_from_the_previous_point() {
        let mut raster = MaskRaster::new(80, 20);
        let mut session = StrokeSession::begin(Pos2::new(10.0, 10.0));
        session.extend_to(Pos2::new(30.0, 10.0), &mut raster, 6.0, BrushMode::Paint);
        session.extend_to(Pos2::new(50.0, 10.0), &mut raster, 6.0, BrushMode::Paint);

        assert_eq!(session.last(), Pos2::new(50.0, 10.0));
        // Covered by the second segment only, proving it started at (30, 10).
        assert_ne!(raster.as_image().get_pixel(40, 10)[3], 0);
        assert_eq!(raster.as_image().get_pixel(60, 10)[3], 0);
    }
}
