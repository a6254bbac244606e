#![cfg(test)]
use std::sync::Arc;

use lts_common::models::ids::{CourseId, ModuleId, TopicId, UserId};
use lts_common::models::image::Image;
use lts_common::models::user::{Session, User};
use lts_core::images::FsImageStorage;
use lts_core::state::LearningState;
use lts_core::storage::document::{CourseEntry, Document, ModuleEntry, TopicEntry};
use lts_core::storage::MemoryStore;
use lts_core::Router;

pub const ANN: &str = "ann@example.com";
pub const BOB: &str = "bob@example.com";

pub fn ann() -> Session {
    Session::new(ANN)
}

fn topics(ids: &[u64]) -> Vec<TopicEntry> {
    ids.iter()
        .map(|id| TopicEntry {
            id: TopicId(*id),
            title: format!("Topic {id}"),
            content: format!("Body of topic {id}"),
        })
        .collect()
}

/// Course 1 "Rust Basics": module 10 (topics 100..=102), module 11 (110, 111).
/// Course 2 "Go Basics" with a cover and no modules.
pub fn document() -> Document {
    Document {
        courses: vec![
            CourseEntry {
                id: CourseId(1),
                title: "Rust Basics".into(),
                cover: None,
                modules: vec![
                    ModuleEntry {
                        id: ModuleId(10),
                        title: "Ownership".into(),
                        author: "ann".into(),
                        has_cover: false,
                        topics: topics(&[100, 101, 102]),
                    },
                    ModuleEntry {
                        id: ModuleId(11),
                        title: "Traits".into(),
                        author: "bob".into(),
                        has_cover: false,
                        topics: topics(&[110, 111]),
                    },
                ],
            },
            CourseEntry {
                id: CourseId(2),
                title: "Go Basics".into(),
                cover: Some(Image::new("image/png", "go.png")),
                modules: Vec::new(),
            },
        ],
        users: vec![
            User { id: UserId(1), email: ANN.into() },
            User { id: UserId(2), email: BOB.into() },
        ],
        completions: Vec::new(),
        enrollments: Vec::new(),
    }
}

pub fn store() -> MemoryStore {
    let state = LearningState::try_from(document()).unwrap();
    MemoryStore::new(state)
}

pub fn router(store: &MemoryStore, images: &std::path::Path) -> Router {
    Router::new(Arc::new(store.clone()), Arc::new(FsImageStorage::new(images)))
}
