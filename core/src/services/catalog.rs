//! # Catalog Service
//!
//! Course list, the course page with its progress counters, and cover images.

use std::sync::Arc;

use lts_common::error::EntityKind;
use lts_common::models::content::Course;
use lts_common::models::ids::CourseId;
use lts_common::models::user::Session;
use lts_common::{LtsError, Result};
use tracing::debug;

use crate::hierarchy::ModuleTree;
use crate::ports::images::ImageStorage;
use crate::ports::store::Store;
use crate::progress::{self, CourseProgress};
use crate::services::{current_user, in_unit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub has_cover: bool,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            has_cover: course.cover.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    pub course: CourseSummary,
    pub assigned: bool,
    pub progress: CourseProgress,
    pub modules: Vec<ModuleTree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

pub struct CatalogService {
    store: Arc<dyn Store>,
    images: Arc<dyn ImageStorage>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>, images: Arc<dyn ImageStorage>) -> Self {
        Self { store, images }
    }

    /// Courses whose title starts with `prefix` (all of them when empty).
    pub async fn list_courses(&self, prefix: &str) -> Result<Vec<CourseSummary>> {
        in_unit(self.store.as_ref(), |unit| {
            let courses: Vec<CourseSummary> = unit
                .state()
                .hierarchy
                .courses_with_title_prefix(prefix)
                .into_iter()
                .map(CourseSummary::from)
                .collect();
            debug!(prefix, found = courses.len(), "listed courses");
            Ok(courses)
        })
        .await
    }

    pub async fn course_page(&self, session: &Session, course: CourseId) -> Result<CoursePage> {
        in_unit(self.store.as_ref(), |unit| {
            let state = unit.state();
            let user = current_user(state, session)?;
            let entity = state.hierarchy.course(course)?;

            Ok(CoursePage {
                course: CourseSummary::from(entity),
                assigned: state.enrollment.is_assigned(user.id, course),
                progress: progress::course_progress(
                    &state.hierarchy,
                    &state.ledger,
                    user.id,
                    course,
                )?,
                modules: state.hierarchy.module_tree(course)?,
            })
        })
        .await
    }

    /// The course's cover, or the default cover when it has none.
    pub async fn cover_image(&self, course: CourseId) -> Result<CoverImage> {
        let image = in_unit(self.store.as_ref(), |unit| {
            Ok(unit.state().hierarchy.course(course)?.cover_or_default())
        })
        .await?;

        let data = self
            .images
            .image_data(&image)
            .await?
            .ok_or_else(|| LtsError::not_found(EntityKind::Course, format!("{course} cover")))?;

        Ok(CoverImage {
            content_type: image.content_type,
            data,
        })
    }
}
