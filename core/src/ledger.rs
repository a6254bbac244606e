//! # Completion Ledger
//!
//! Records which users finished which topics as a single set of
//! `(user, topic)` pairs. "Topics completed by a user" and "users who completed
//! a topic" are both read off that one set, so the two views cannot disagree.
//!
//! Entries are permanent: there is no operation that removes one.

use std::collections::BTreeSet;

use lts_common::models::ids::{TopicId, UserId};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompletionLedger {
    entries: BTreeSet<(UserId, TopicId)>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `user` finished `topic`.
    ///
    /// Returns `false` when the pair was already recorded; that is not an error.
    pub fn mark_complete(&mut self, user: UserId, topic: TopicId) -> bool {
        self.entries.insert((user, topic))
    }

    pub fn is_complete(&self, user: UserId, topic: TopicId) -> bool {
        self.entries.contains(&(user, topic))
    }

    pub fn completed_topics(&self, user: UserId) -> BTreeSet<TopicId> {
        self.entries
            .range((user, TopicId(u64::MIN))..=(user, TopicId(u64::MAX)))
            .map(|(_, topic)| *topic)
            .collect()
    }

    pub fn completed_by(&self, topic: TopicId) -> BTreeSet<UserId> {
        self.entries
            .iter()
            .filter(|(_, t)| *t == topic)
            .map(|(user, _)| *user)
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (UserId, TopicId)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
