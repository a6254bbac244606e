use serde::{Deserialize, Serialize};

pub const DEFAULT_COVER_CONTENT_TYPE: &str = "image/jpeg";
pub const DEFAULT_COVER_FILENAME: &str = "default_cover.jpeg";

/// Reference to image bytes held by the image-storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub content_type: String,
    /// Storage key, resolved relative to the image store root.
    pub filename: String,
}

impl Image {
    pub fn new(content_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            filename: filename.into(),
        }
    }

    /// The cover shown for courses that have none of their own.
    pub fn default_cover() -> Self {
        Self::new(DEFAULT_COVER_CONTENT_TYPE, DEFAULT_COVER_FILENAME)
    }
}
