use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use lts_common::Result;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::ports::store::{Store, UnitOfWork};
use crate::state::{Change, LearningState};
use crate::storage::document::Document;

struct Shared {
    live: RwLock<LearningState>,
    /// Serialises commits, so each one builds on the previous and files are
    /// written in commit order.
    commit_lock: Mutex<()>,
    file: Option<PathBuf>,
}

/// In-process store, optionally mirrored to a JSON [`Document`] on disk.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new(state: LearningState) -> Self {
        Self::build(state, None)
    }

    /// Loads `path` and writes every later commit back to it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path).await?;
        let state = LearningState::try_from(document)?;
        info!(path = %path.display(), "opened storage document");
        Ok(Self::build(state, Some(path.to_path_buf())))
    }

    fn build(state: LearningState, file: Option<PathBuf>) -> Self {
        Self {
            shared: Arc::new(Shared {
                live: RwLock::new(state),
                commit_lock: Mutex::new(()),
                file,
            }),
        }
    }

    /// A copy of the committed state.
    pub async fn snapshot(&self) -> LearningState {
        self.shared.live.read().await.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let view = self.shared.live.read().await.clone();
        Ok(Box::new(MemoryUnit {
            view,
            journal: Vec::new(),
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MemoryUnit {
    view: LearningState,
    journal: Vec<Change>,
    shared: Arc<Shared>,
}

#[async_trait]
impl UnitOfWork for MemoryUnit {
    fn state(&self) -> &LearningState {
        &self.view
    }

    fn record(&mut self, change: Change) -> bool {
        self.journal.push(change);
        change.apply(&mut self.view)
    }

    async fn commit(self: Box<Self>) -> Result<usize> {
        let MemoryUnit { journal, shared, .. } = *self;
        if journal.is_empty() {
            return Ok(0);
        }

        let _guard = shared.commit_lock.lock().await;

        let mut next = shared.live.read().await.clone();
        let applied = journal
            .iter()
            .filter(|change| change.apply(&mut next))
            .count();
        if applied == 0 {
            debug!(changes = journal.len(), "unit of work changed nothing");
            return Ok(0);
        }

        if let Some(path) = &shared.file {
            Document::from(&next).save(path).await?;
        }

        *shared.live.write().await = next;
        info!(changes = journal.len(), applied, "committed unit of work");
        Ok(applied)
    }

    fn rollback(self: Box<Self>) {
        debug!(discarded = self.journal.len(), "rolled back unit of work");
    }
}
