use async_trait::async_trait;
use lts_common::Result;

use crate::state::{Change, LearningState};

/// The persistence collaborator.
///
/// Every request opens exactly one [`UnitOfWork`] and either commits it or lets
/// it go. Uniqueness of ledger and enrollment entries is the store's job.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}

/// One request's view of the learning state.
///
/// Reads see a consistent snapshot taken at [`Store::begin`] plus the changes
/// recorded so far in this unit. Nothing becomes visible to other units until
/// [`UnitOfWork::commit`] returns.
#[async_trait]
pub trait UnitOfWork: Send {
    fn state(&self) -> &LearningState;

    /// Applies `change` to this unit's view and journals it for commit.
    ///
    /// Returns `false` if the view already reflected the change.
    fn record(&mut self, change: Change) -> bool;

    /// Publishes the journal atomically.
    ///
    /// Returns how many journalled changes took effect on the committed
    /// state; a change another unit already committed counts as zero.
    async fn commit(self: Box<Self>) -> Result<usize>;

    /// Discards the journal. Dropping a unit without committing does the same.
    fn rollback(self: Box<Self>);
}
