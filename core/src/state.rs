//! # Learning State
//!
//! Everything a store persists: the content hierarchy, the users, the
//! completion ledger and the enrollment registry.
//!
//! Writes are expressed as [`Change`] values rather than direct mutation so a
//! unit of work can replay exactly what a request did onto the shared state at
//! commit time.

use std::collections::BTreeMap;

use lts_common::error::EntityKind;
use lts_common::models::ids::{CourseId, TopicId, UserId};
use lts_common::models::user::User;
use lts_common::{LtsError, Result};

use crate::enrollment::EnrollmentRegistry;
use crate::hierarchy::ContentHierarchy;
use crate::ledger::CompletionLedger;

#[derive(Debug, Default, Clone)]
pub struct UserDirectory {
    users: BTreeMap<UserId, User>,
    by_email: BTreeMap<String, UserId>,
}

impl UserDirectory {
    pub fn add(&mut self, user: User) -> Result<()> {
        if self.users.contains_key(&user.id) {
            return Err(LtsError::Document(format!("duplicate user id {}", user.id)));
        }
        if self.by_email.contains_key(&user.email) {
            return Err(LtsError::Document(format!("duplicate email {}", user.email)));
        }
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn get(&self, id: UserId) -> Result<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| LtsError::not_found(EntityKind::User, id))
    }

    pub fn by_email(&self, email: &str) -> Result<&User> {
        self.by_email
            .get(email)
            .and_then(|id| self.users.get(id))
            .ok_or_else(|| LtsError::not_found(EntityKind::User, email))
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

/// A single write a request wants to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Complete { user: UserId, topic: TopicId },
    Assign { user: UserId, course: CourseId },
    Unassign { user: UserId, course: CourseId },
}

impl Change {
    /// Applies the change; `false` means the state already reflected it.
    pub fn apply(&self, state: &mut LearningState) -> bool {
        match *self {
            Change::Complete { user, topic } => state.ledger.mark_complete(user, topic),
            Change::Assign { user, course } => state.enrollment.assign(user, course),
            Change::Unassign { user, course } => state.enrollment.unassign(user, course),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LearningState {
    pub hierarchy: ContentHierarchy,
    pub users: UserDirectory,
    pub ledger: CompletionLedger,
    pub enrollment: EnrollmentRegistry,
}

impl LearningState {
    pub fn new() -> Self {
        Self::default()
    }
}
