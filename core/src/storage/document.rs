//! The storage document: the whole learning state as nested JSON.
//!
//! ```json
//! {
//!   "courses": [{
//!     "id": 1, "title": "Rust",
//!     "cover": { "content_type": "image/png", "filename": "rust.png" },
//!     "modules": [{
//!       "id": 10, "title": "Ownership", "author": "ann",
//!       "topics": [{ "id": 100, "title": "Moves", "content": "..." }]
//!     }]
//!   }],
//!   "users": [{ "id": 1, "email": "ann@example.com" }],
//!   "completions": [{ "user": 1, "topic": 100 }],
//!   "enrollments": [{ "user": 1, "course": 1 }]
//! }
//! ```
//!
//! Array order of `modules` and `topics` is the authoring order.

use std::path::Path;

use lts_common::error::EntityKind;
use lts_common::models::content::{Course, Module, Topic};
use lts_common::models::ids::{CourseId, ModuleId, TopicId, UserId};
use lts_common::models::image::Image;
use lts_common::models::user::User;
use lts_common::{LtsError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::LearningState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub completions: Vec<CompletionEntry>,
    #[serde(default)]
    pub enrollments: Vec<EnrollmentEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub id: CourseId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Image>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub has_cover: bool,
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub user: UserId,
    pub topic: TopicId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentEntry {
    pub user: UserId,
    pub course: CourseId,
}

impl Document {
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let document: Document = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), courses = document.courses.len(), "loaded storage document");
        Ok(document)
    }

    /// Writes the document next to `path` and renames it into place, so a
    /// reader never sees a half-written file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!(path = %path.display(), "saved storage document");
        Ok(())
    }
}

fn dangling(what: &str, kind: EntityKind, err: LtsError) -> LtsError {
    match err {
        LtsError::NotFound { id, .. } => {
            LtsError::Document(format!("{what} refers to unknown {kind} {id}"))
        }
        other => other,
    }
}

impl TryFrom<Document> for LearningState {
    type Error = LtsError;

    fn try_from(document: Document) -> Result<Self> {
        let mut state = LearningState::new();

        for course in document.courses {
            let mut entity = Course::new(course.id, course.title);
            entity.cover = course.cover;
            state.hierarchy.add_course(entity)?;

            for module in course.modules {
                let mut entity = Module::new(module.id, course.id, module.title, module.author);
                entity.has_cover = module.has_cover;
                state.hierarchy.add_module(entity)?;

                for topic in module.topics {
                    state
                        .hierarchy
                        .add_topic(Topic::new(topic.id, module.id, topic.title, topic.content))?;
                }
            }
        }

        for user in document.users {
            state.users.add(user)?;
        }

        for entry in document.completions {
            state
                .users
                .get(entry.user)
                .map_err(|e| dangling("completion", EntityKind::User, e))?;
            state
                .hierarchy
                .topic(entry.topic)
                .map_err(|e| dangling("completion", EntityKind::Topic, e))?;
            state.ledger.mark_complete(entry.user, entry.topic);
        }

        for entry in document.enrollments {
            state
                .users
                .get(entry.user)
                .map_err(|e| dangling("enrollment", EntityKind::User, e))?;
            state
                .hierarchy
                .course(entry.course)
                .map_err(|e| dangling("enrollment", EntityKind::Course, e))?;
            state.enrollment.assign(entry.user, entry.course);
        }

        Ok(state)
    }
}

impl From<&LearningState> for Document {
    fn from(state: &LearningState) -> Self {
        let tree = &state.hierarchy;
        let courses = tree
            .courses()
            .map(|course| CourseEntry {
                id: course.id,
                title: course.title.clone(),
                cover: course.cover.clone(),
                modules: tree
                    .modules_of(course.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|module| ModuleEntry {
                        id: module.id,
                        title: module.title.clone(),
                        author: module.author.clone(),
                        has_cover: module.has_cover,
                        topics: tree
                            .topics_of(module.id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|topic| TopicEntry {
                                id: topic.id,
                                title: topic.title.clone(),
                                content: topic.content.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Document {
            courses,
            users: state.users.iter().cloned().collect(),
            completions: state
                .ledger
                .entries()
                .map(|(user, topic)| CompletionEntry { user, topic })
                .collect(),
            enrollments: state
                .enrollment
                .entries()
                .map(|(user, course)| EnrollmentEntry { user, course })
                .collect(),
        }
    }
}
