use std::path::PathBuf;

#[derive(serde::Deserialize, serde::Serialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub image_dir: Option<PathBuf>,
    pub brush_diameter: f32,
    pub viewport: emath::Vec2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: None,
            brush_diameter: 20.0,
            viewport: emath::Vec2::new(900.0, 700.0),
        }
    }
}
