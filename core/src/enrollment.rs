//! # Enrollment Registry
//!
//! Which users assigned themselves to which courses. Enrollment is about
//! visibility only; it never touches the [`CompletionLedger`](crate::ledger::CompletionLedger).

use std::collections::BTreeSet;

use lts_common::models::ids::{CourseId, UserId};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrollmentRegistry {
    entries: BTreeSet<(UserId, CourseId)>,
}

impl EnrollmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the user was already assigned.
    pub fn assign(&mut self, user: UserId, course: CourseId) -> bool {
        self.entries.insert((user, course))
    }

    /// Returns `false` if the user was not assigned.
    pub fn unassign(&mut self, user: UserId, course: CourseId) -> bool {
        self.entries.remove(&(user, course))
    }

    pub fn is_assigned(&self, user: UserId, course: CourseId) -> bool {
        self.entries.contains(&(user, course))
    }

    pub fn courses_of(&self, user: UserId) -> BTreeSet<CourseId> {
        self.entries
            .range((user, CourseId(u64::MIN))..=(user, CourseId(u64::MAX)))
            .map(|(_, course)| *course)
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (UserId, CourseId)> + '_ {
        self.entries.iter().copied()
    }
}
