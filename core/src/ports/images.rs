use async_trait::async_trait;
use lts_common::Result;
use lts_common::models::image::Image;

/// Defines the contract for fetching the bytes behind an image reference.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Retrieves the stored bytes for `image`.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` - The image exists.
    /// * `Ok(None)` - Nothing is stored under that reference.
    async fn image_data(&self, image: &Image) -> Result<Option<Vec<u8>>>;
}
