use egui::{Pos2, Rect, Vec2};

/// Mapping between display coordinates and image-space pixel coordinates for
/// an image rendered with "contain" fitting: the image is scaled to fit the
/// display rect while keeping its aspect ratio, centered on the letterboxed
/// axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainTransform {
    display_min: Pos2,
    /// Letterbox offset inside the display rect, in display pixels.
    /// Exactly one component is zero (both when the aspects match).
    offset: Vec2,
    /// Size the image occupies on screen, in display pixels.
    effective: Vec2,
    /// Image pixels per display pixel, per axis.
    scale: Vec2,
}

impl ContainTransform {
    /// Returns `None` while the display rect has no extent (not laid out yet)
    /// or the image has no pixels, so callers cannot divide by zero.
    pub fn compute(display: Rect, image_size: Vec2) -> Option<Self> {
        if display.width() <= 0.0
            || display.height() <= 0.0
            || image_size.x <= 0.0
            || image_size.y <= 0.0
        {
            return None;
        }

        let display_aspect = display.width() / display.height();
        let image_aspect = image_size.x / image_size.y;

        let (effective, offset) = if image_aspect > display_aspect {
            // Image is relatively wider: spans the full width, bands top/bottom.
            let height = display.width() / image_aspect;
            (
                Vec2::new(display.width(), height),
                Vec2::new(0.0, (display.height() - height) * 0.5),
            )
        } else {
            let width = display.height() * image_aspect;
            (
                Vec2::new(width, display.height()),
                Vec2::new((display.width() - width) * 0.5, 0.0),
            )
        };

        Some(Self {
            display_min: display.min,
            offset,
            effective,
            scale: Vec2::new(image_size.x / effective.x, image_size.y / effective.y),
        })
    }

    pub fn display_to_image(&self, pos: Pos2) -> Pos2 {
        let rel = pos - self.display_min - self.offset;
        Pos2::new(rel.x * self.scale.x, rel.y * self.scale.y)
    }

    pub fn image_to_display(&self, pos: Pos2) -> Pos2 {
        Pos2::new(
            pos.x / self.scale.x + self.display_min.x + self.offset.x,
            pos.y / self.scale.y + self.display_min.y + self.offset.y,
        )
    }

    /// Display-space rect the image actually occupies.
    pub fn image_rect(&self) -> Rect {
        Rect::from_min_size(self.display_min + self.offset, self.effective)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Uniform factor for converting line widths between the two spaces.
    /// With contain fitting both axis scales are equal up to rounding, so the
    /// average is representative.
    pub fn line_width_scale(&self) -> f32 {
        (self.scale.x + self.scale.y) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pos_eq(actual: Pos2, expected: Pos2, tolerance: f32) {
        assert!(
            (actual.x - expected.x).abs() <= tolerance
                && (actual.y - expected.y).abs() <= tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn matching_aspect_has_zero_offsets() {
        let display = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0));
        let t = ContainTransform::compute(display, Vec2::new(1600.0, 1200.0)).unwrap();
        assert_eq!(t.offset(), Vec2::ZERO);
        assert_eq!(t.scale(), Vec2::new(4.0, 4.0));
        assert_pos_eq(
            t.display_to_image(Pos2::new(50.0, 50.0)),
            Pos2::new(200.0, 200.0),
            1e-3,
        );
        assert_pos_eq(
            t.display_to_image(Pos2::new(150.0, 50.0)),
            Pos2::new(600.0, 200.0),
            1e-3,
        );
    }

    #[test]
    fn wide_image_is_letterboxed_top_and_bottom() {
        let display = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0));
        let t = ContainTransform::compute(display, Vec2::new(1000.0, 500.0)).unwrap();
        assert_eq!(t.offset(), Vec2::new(0.0, 100.0));
        assert_eq!(t.image_rect().size(), Vec2::new(400.0, 200.0));
        assert_eq!(t.scale(), Vec2::new(2.5, 2.5));
    }

    #[test]
    fn tall_image_is_pillarboxed_left_and_right() {
        let display = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0));
        let t = ContainTransform::compute(display, Vec2::new(500.0, 1000.0)).unwrap();
        assert_eq!(t.offset(), Vec2::new(100.0, 0.0));
        assert_eq!(t.image_rect().size(), Vec2::new(200.0, 400.0));
    }

    #[test]
    fn display_rect_origin_is_subtracted() {
        let display = Rect::from_min_size(Pos2::new(30.0, 20.0), Vec2::new(400.0, 300.0));
        let t = ContainTransform::compute(display, Vec2::new(800.0, 600.0)).unwrap();
        assert_pos_eq(
            t.display_to_image(Pos2::new(30.0, 20.0)),
            Pos2::ZERO,
            1e-3,
        );
    }

    #[test]
    fn round_trip_stays_within_one_pixel() {
        let display = Rect::from_min_size(Pos2::new(13.5, 7.25), Vec2::new(333.0, 481.0));
        let t = ContainTransform::compute(display, Vec2::new(1237.0, 911.0)).unwrap();
        let image_rect = t.image_rect();
        for pointer in [
            image_rect.center(),
            image_rect.lerp_inside(Vec2::new(0.1, 0.85)),
            image_rect.lerp_inside(Vec2::new(0.93, 0.02)),
        ] {
            let round_trip = t.image_to_display(t.display_to_image(pointer));
            assert_pos_eq(round_trip, pointer, 1.0);
        }
    }

    #[test]
    fn degenerate_display_rect_yields_none() {
        let image_size = Vec2::new(800.0, 600.0);
        let zero_width = Rect::from_min_size(Pos2::ZERO, Vec2::new(0.0, 100.0));
        let zero_height = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 0.0));
        assert!(ContainTransform::compute(zero_width, image_size).is_none());
        assert!(ContainTransform::compute(zero_height, image_size).is_none());
        let display = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
        assert!(ContainTransform::compute(display, Vec2::ZERO).is_none());
    }

    #[test]
    fn mapping_is_continuous_across_aspect_equality() {
        let image_size = Vec2::new(800.0, 600.0);
        let pointer = Pos2::new(123.0, 87.0);
        let slightly_wide = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.05, 300.0));
        let slightly_tall = Rect::from_min_size(Pos2::ZERO, Vec2::new(399.95, 300.0));
        let a = ContainTransform::compute(slightly_wide, image_size)
            .unwrap()
            .display_to_image(pointer);
        let b = ContainTransform::compute(slightly_tall, image_size)
            .unwrap()
            .display_to_image(pointer);
        assert_pos_eq(a, b, 0.5);
    }
}
