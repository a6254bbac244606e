//! # Progress Aggregator
//!
//! Read-only counts over a course. Both queries walk the live hierarchy on
//! every call instead of trusting a cached total.

use std::fmt;

use lts_common::Result;
use lts_common::models::ids::{CourseId, UserId};

use crate::hierarchy::ContentHierarchy;
use crate::ledger::CompletionLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub completed: usize,
    pub total: usize,
}

impl CourseProgress {
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl fmt::Display for CourseProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Completed {} of {} topics", self.completed, self.total)
    }
}

/// Number of topics across all modules of `course`.
pub fn total_topics(tree: &ContentHierarchy, course: CourseId) -> Result<usize> {
    Ok(tree
        .modules_of(course)?
        .iter()
        .map(|module| module.topic_count())
        .sum())
}

/// Number of topics of `course` that `user` has completed.
pub fn completed_by_user(
    tree: &ContentHierarchy,
    ledger: &CompletionLedger,
    user: UserId,
    course: CourseId,
) -> Result<usize> {
    Ok(tree
        .modules_of(course)?
        .iter()
        .flat_map(|module| module.topics.iter())
        .filter(|topic| ledger.is_complete(user, **topic))
        .count())
}

pub fn course_progress(
    tree: &ContentHierarchy,
    ledger: &CompletionLedger,
    user: UserId,
    course: CourseId,
) -> Result<CourseProgress> {
    Ok(CourseProgress {
        completed: completed_by_user(tree, ledger, user, course)?,
        total: total_topics(tree, course)?,
    })
}
