use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use lts_common::Result;
use lts_common::models::image::Image;
use tracing::debug;

use crate::ports::images::ImageStorage;

/// Serves image bytes from files under a root directory.
pub struct FsImageStorage {
    root: PathBuf,
}

impl FsImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStorage for FsImageStorage {
    async fn image_data(&self, image: &Image) -> Result<Option<Vec<u8>>> {
        // Keys are plain file names; anything with a path component is unknown.
        let key = image.filename.as_str();
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Ok(None);
        }

        let path = self.root.join(&image.filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "image not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
