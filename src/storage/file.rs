use std::{fs::DirEntry, io, path::PathBuf};

use futures::FutureExt;
use itertools::Itertools;
use log::info;

use super::{classify, ImageData, ImageId, ImageListItem, Kind, Storage, MASK_SUFFIX};
use crate::async_task::BoxFuture;
use crate::image_utils::load_image;

/// Storage over a directory tree of image files. Exported masks are written
/// next to their source as `{stem}.mask.png`.
pub struct FileStorage {
    base: String,
}

impl FileStorage {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn list_images_blocking(path: PathBuf) -> io::Result<Vec<ImageListItem>> {
        Ok(visit_directory_files(path)
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                let (stem, kind) = classify(&path)?;
                Some((stem, kind, path.to_str()?.to_string()))
            })
            .sorted_unstable()
            .chunk_by(|(stem, _, _)| stem.clone())
            .into_iter()
            .filter_map(|(name, mut members)| {
                let (_, kind, id) = members.next().expect("chunks are non-empty");
                match (kind, members.next()) {
                    // A mask without its source image is not editable.
                    (Kind::Mask, None) | (Kind::Mask, Some((_, Kind::Mask, _))) => None,
                    (Kind::Mask, Some((_, Kind::Image, id))) => Some(ImageListItem {
                        id: id.into(),
                        name,
                        has_mask: true,
                    }),
                    (Kind::Image, _) => Some(ImageListItem {
                        id: id.into(),
                        name,
                        has_mask: false,
                    }),
                }
            })
            .collect())
    }

    fn mask_path(id: &ImageId) -> io::Result<PathBuf> {
        let image_path = std::path::Path::new(&**id);
        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::other("image path has no filename"))?;
        let parent = image_path
            .parent()
            .ok_or_else(|| io::Error::other("image path has no parent directory"))?;
        Ok(parent.join(format!("{stem}{MASK_SUFFIX}.png")))
    }
}

impl Storage for FileStorage {
    fn list_images(&self) -> BoxFuture<io::Result<Vec<ImageListItem>>> {
        let (tx, rx) = futures::channel::oneshot::channel();
        let base: PathBuf = self.base.as_str().into();

        let handle = std::thread::spawn(|| tx.send(Self::list_images_blocking(base)));
        async move {
            let r = rx.await.map_err(io::Error::other).and_then(|a| a);
            handle.join().unwrap().expect("channel cannot be gone");
            r
        }
        .boxed()
    }

    fn load_image(&self, id: &ImageId) -> BoxFuture<io::Result<ImageData>> {
        let id = id.clone();
        async move {
            let bytes = std::fs::read(&*id)?;
            let image = load_image(&bytes)?;
            Ok(ImageData { id, image })
        }
        .boxed()
    }

    fn store_mask(&self, id: ImageId, mask_png: Vec<u8>) -> BoxFuture<io::Result<()>> {
        let path = Self::mask_path(&id);
        async move {
            let path = path?;
            info!("Store mask at: {path:?}");
            std::fs::write(path, mask_png)
        }
        .boxed()
    }
}

fn visit_directory_files(
    path: impl Into<PathBuf>,
) -> Box<dyn Iterator<Item = io::Result<DirEntry>>> {
    match std::fs::read_dir(path.into()) {
        Ok(read_dir) => Box::new(read_dir.flat_map(|entry| match entry {
            Ok(entry) => match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => visit_directory_files(entry.path()),
                Ok(_) => Box::new(std::iter::once(Ok(entry))),
                Err(e) => Box::new(std::iter::once(Err(e))),
            },
            Err(e) => Box::new(std::iter::once(Err(e))),
        })),
        Err(e) => Box::new(std::iter::once(Err(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_stored_next_to_the_image() {
        let path = FileStorage::mask_path(&ImageId::from("/data/images/cat.jpg")).unwrap();
        assert_eq!(path, PathBuf::from("/data/images/cat.mask.png"));
    }

    #[test]
    fn rootless_image_path_is_rejected() {
        assert!(FileStorage::mask_path(&ImageId::from("/")).is_err());
    }
}
