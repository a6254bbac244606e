//! # Lesson Service
//!
//! Step-based lesson pages and topic completion.

use std::sync::Arc;

use lts_common::Result;
use lts_common::models::ids::{CourseId, ModuleId, TopicId};
use lts_common::models::user::Session;
use tracing::{debug, info};

use crate::navigator::{self, LessonPosition};
use crate::ports::store::Store;
use crate::services::{current_user, in_unit, in_unit_applied};
use crate::state::Change;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicView {
    pub id: TopicId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage {
    /// Owning course of the module, not whatever the request path said.
    pub course_id: CourseId,
    pub module_id: ModuleId,
    pub module_title: String,
    pub topic: TopicView,
    pub position: LessonPosition,
    pub completed: bool,
}

pub struct LessonService {
    store: Arc<dyn Store>,
}

impl LessonService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The lesson at `step` of `module`, with its neighbours and the caller's
    /// completion flag.
    pub async fn lesson_page(
        &self,
        session: &Session,
        module: ModuleId,
        step: i64,
    ) -> Result<LessonPage> {
        in_unit(self.store.as_ref(), |unit| {
            let state = unit.state();
            let tree = &state.hierarchy;

            let entity = tree.module(module)?;
            let topic = navigator::resolve_step(tree, module, step)?;
            let user = current_user(state, session)?;
            let position = LessonPosition::new(step as usize, entity.topic_count());

            debug!(module = %module, step, topic = %topic.id, "resolved lesson step");
            Ok(LessonPage {
                course_id: entity.course,
                module_id: entity.id,
                module_title: entity.title.clone(),
                topic: TopicView {
                    id: topic.id,
                    title: topic.title.clone(),
                    content: topic.content.clone(),
                },
                position,
                completed: state.ledger.is_complete(user.id, topic.id),
            })
        })
        .await
    }

    /// Step at which `topic` sits in `module`.
    pub async fn step_for_topic(&self, module: ModuleId, topic: TopicId) -> Result<usize> {
        in_unit(self.store.as_ref(), |unit| {
            let tree = &unit.state().hierarchy;
            tree.topic(topic)?;
            navigator::step_for_topic(tree, module, topic)
        })
        .await
    }

    /// Marks `topic` complete for the caller.
    ///
    /// Returns `false` if it already was, including when a concurrent
    /// request committed the same completion first; that still counts as
    /// success.
    pub async fn complete_topic(&self, session: &Session, topic: TopicId) -> Result<bool> {
        let (user, applied) = in_unit_applied(self.store.as_ref(), |unit| {
            let state = unit.state();
            let user = current_user(state, session)?.id;
            state.hierarchy.topic(topic)?;

            unit.record(Change::Complete { user, topic });
            Ok(user)
        })
        .await?;

        let added = applied > 0;
        if added {
            info!(user = %user, topic = %topic, "topic completed");
        } else {
            debug!(user = %user, topic = %topic, "topic already completed");
        }
        Ok(added)
    }
}
