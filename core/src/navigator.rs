//! # Lesson Navigator
//!
//! Maps a 1-based step inside a module to its topic and back, and computes the
//! previous/next steps for the lesson page.
//!
//! The neighbours are clamped to the module: "previous" from step 1 is step 1
//! and "next" from the last step is the last step. Positions are looked up in
//! the module's current topic order on every call and must not be cached
//! across changes to that order.

use lts_common::error::EntityKind;
use lts_common::models::content::Topic;
use lts_common::models::ids::{ModuleId, TopicId};
use lts_common::{LtsError, Result};

use crate::hierarchy::ContentHierarchy;

/// A resolved step together with its clamped neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonPosition {
    pub step: usize,
    pub previous: usize,
    pub next: usize,
    pub max_step: usize,
}

impl LessonPosition {
    pub fn new(step: usize, max_step: usize) -> Self {
        Self {
            step,
            previous: previous_step(step),
            next: next_step(step, max_step),
            max_step,
        }
    }

    pub fn is_first(&self) -> bool {
        self.step == 1
    }

    pub fn is_last(&self) -> bool {
        self.step == self.max_step
    }
}

/// The topic at `step` of `module`.
///
/// Fails with [`LtsError::OutOfRange`] unless `1 <= step <= topic count`.
pub fn resolve_step(tree: &ContentHierarchy, module: ModuleId, step: i64) -> Result<&Topic> {
    let module = tree.module(module)?;
    let max_step = module.topic_count();

    let index = usize::try_from(step)
        .ok()
        .filter(|s| (1..=max_step).contains(s))
        .map(|s| s - 1)
        .ok_or(LtsError::OutOfRange { step, max_step })?;

    tree.topic(module.topics[index])
}

pub fn previous_step(step: usize) -> usize {
    if step > 1 { step - 1 } else { 1 }
}

pub fn next_step(step: usize, max_step: usize) -> usize {
    if step < max_step { step + 1 } else { max_step }
}

/// 1-based position of `topic` in `module`.
pub fn step_for_topic(tree: &ContentHierarchy, module: ModuleId, topic: TopicId) -> Result<usize> {
    let module = tree.module(module)?;
    module
        .topics
        .iter()
        .position(|id| *id == topic)
        .map(|index| index + 1)
        .ok_or_else(|| LtsError::not_found(EntityKind::Topic, topic))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
