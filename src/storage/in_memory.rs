use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex},
};

use futures::FutureExt;
use image::RgbaImage;

use super::{ImageData, ImageId, ImageListItem, Storage};
use crate::async_task::BoxFuture;
use crate::image_utils::checkerboard;

/// Storage backed by process memory, used for demos and tests. Uploaded masks
/// are retained and can be inspected afterwards.
pub struct InMemoryStorage {
    images: Arc<Mutex<HashMap<ImageId, RgbaImage>>>,
    masks: Arc<Mutex<HashMap<ImageId, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new(images: impl IntoIterator<Item = (ImageId, RgbaImage)>) -> Self {
        Self {
            images: Arc::new(Mutex::new(images.into_iter().collect())),
            masks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn checkerboard() -> Self {
        Self::new([(ImageId::from("checkerboard"), checkerboard(1024, 768, 64))])
    }

    pub fn uploaded_mask(&self, id: &ImageId) -> Option<Vec<u8>> {
        self.masks.lock().unwrap().get(id).cloned()
    }
}

impl Storage for InMemoryStorage {
    fn list_images(&self) -> BoxFuture<io::Result<Vec<ImageListItem>>> {
        let masks = self.masks.lock().unwrap();
        let items = self
            .images
            .lock()
            .unwrap()
            .keys()
            .map(|id| ImageListItem {
                id: id.clone(),
                name: id.to_string(),
                has_mask: masks.contains_key(id),
            })
            .collect();
        std::future::ready(Ok(items)).boxed()
    }

    fn load_image(&self, id: &ImageId) -> BoxFuture<io::Result<ImageData>> {
        let id = id.clone();
        let data = self
            .images
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .map(|image| ImageData {
                id: id.clone(),
                image,
            })
            .ok_or_else(|| io::Error::other(format!("unknown image id {:?}", &*id)));
        std::future::ready(data).boxed()
    }

    fn store_mask(&self, id: ImageId, mask_png: Vec<u8>) -> BoxFuture<io::Result<()>> {
        self.masks.lock().unwrap().insert(id, mask_png);
        std::future::ready(Ok(())).boxed()
    }
}
