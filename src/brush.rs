use egui::Vec2;

/// Reference display size the brush width is normalized against. Images whose
/// average dimension exceeds this get proportionally thicker strokes so the
/// brush looks the same regardless of native resolution.
pub const REFERENCE_DISPLAY_SIZE: f32 = 800.0;

pub const MIN_BRUSH_DIAMETER: f32 = 5.0;
pub const MAX_BRUSH_DIAMETER: f32 = 100.0;

/// Compositing strategy for a stroke. Paint adds semi-opaque white, erase
/// clears previously painted pixels. Both use identical geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushMode {
    #[default]
    Paint,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    pub mode: BrushMode,
    /// Nominal diameter in reference-display units, not image pixels.
    pub diameter: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            mode: BrushMode::default(),
            diameter: 20.0,
        }
    }
}

impl BrushState {
    pub fn new(mode: BrushMode, diameter: f32) -> Self {
        Self {
            mode,
            diameter: diameter.clamp(MIN_BRUSH_DIAMETER, MAX_BRUSH_DIAMETER),
        }
    }

    /// Stroke width in image-space pixels for an image of the given native
    /// size. Never narrower than the nominal diameter for small images.
    pub fn stroke_width(&self, image_size: Vec2) -> f32 {
        let resolution_scale = (image_size.x + image_size.y) * 0.5 / REFERENCE_DISPLAY_SIZE;
        let diameter = self
            .diameter
            .clamp(MIN_BRUSH_DIAMETER, MAX_BRUSH_DIAMETER);
        diameter * resolution_scale.max(1.0)
    }
}
