use std::{io, ops::Deref, sync::Arc};

use image::RgbaImage;

use crate::async_task::BoxFuture;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod in_memory;

#[derive(PartialEq, Clone, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct ImageId(Arc<str>);

impl Deref for ImageId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for ImageId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

pub struct ImageData {
    pub id: ImageId,
    /// Decoded at native resolution; its dimensions size the mask raster.
    pub image: RgbaImage,
}

#[derive(Debug, Clone)]
pub struct ImageListItem {
    pub id: ImageId,
    pub name: String,
    pub has_mask: bool,
}

/// Boundary to the external collaborators: where images come from and where
/// the exported binary mask goes. All methods return futures the app polls
/// per frame.
pub trait Storage {
    fn list_images(&self) -> BoxFuture<io::Result<Vec<ImageListItem>>>;
    fn load_image(&self, id: &ImageId) -> BoxFuture<io::Result<ImageData>>;
    fn store_mask(&self, id: ImageId, mask_png: Vec<u8>) -> BoxFuture<io::Result<()>>;
}

const MASK_SUFFIX: &str = ".mask";

/// Image files become list entries; `{stem}.mask.png` files mark an already
/// exported mask for their stem.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Kind {
    Mask,
    Image,
}

fn classify(path: &std::path::Path) -> Option<(String, Kind)> {
    let extension = path.extension()?.to_str()?;
    if !matches!(extension, "jpeg" | "jpg" | "png" | "tiff" | "tif") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    match stem.strip_suffix(MASK_SUFFIX) {
        Some(base) => Some((base.to_string(), Kind::Mask)),
        None => Some((stem.to_string(), Kind::Image)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_separates_masks_from_images() {
        assert_eq!(
            classify(std::path::Path::new("/data/cat.jpg")),
            Some(("cat".into(), Kind::Image))
        );
        assert_eq!(
            classify(std::path::Path::new("/data/cat.mask.png")),
            Some(("cat".into(), Kind::Mask))
        );
        assert_eq!(classify(std::path::Path::new("/data/notes.txt")), None);
    }
}
