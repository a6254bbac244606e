//! # Content Hierarchy Entities
//!
//! `Course → Module → Topic` is a strict tree. Parents own the *order* of their
//! children (`modules`, `topics` are authoring-ordered id lists); children carry
//! a back-reference to their single parent.
//!
//! The position of a topic inside `Module::topics` is its lesson step:
//! step `N` (1-based) addresses `topics[N - 1]`.

use super::ids::{CourseId, ModuleId, TopicId};
use super::image::Image;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub cover: Option<Image>,
    pub modules: Vec<ModuleId>,
}

impl Course {
    pub fn new(id: CourseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover: None,
            modules: Vec::new(),
        }
    }

    pub fn with_cover(mut self, cover: Image) -> Self {
        self.cover = Some(cover);
        self
    }

    /// The cover to serve: the course's own, or the shared default.
    pub fn cover_or_default(&self) -> Image {
        self.cover.clone().unwrap_or_else(Image::default_cover)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: ModuleId,
    pub course: CourseId,
    pub title: String,
    pub author: String,
    pub has_cover: bool,
    pub topics: Vec<TopicId>,
}

impl Module {
    pub fn new(
        id: ModuleId,
        course: CourseId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id,
            course,
            title: title.into(),
            author: author.into(),
            has_cover: false,
            topics: Vec::new(),
        }
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub module: ModuleId,
    pub title: String,
    pub content: String,
}

impl Topic {
    pub fn new(
        id: TopicId,
        module: ModuleId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            module,
            title: title.into(),
            content: content.into(),
        }
    }
}
