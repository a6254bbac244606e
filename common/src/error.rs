//! # Error Taxonomy
//!
//! Every core operation is terminal on failure: the request's unit of work is
//! discarded and the error surfaces at the boundary. Callers that need the
//! outward signal ask [`LtsError::is_not_found`], which deliberately folds an
//! out-of-range step into the same "not found" class as a missing entity.

use std::fmt;

use thiserror::Error;

/// The kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Module,
    Topic,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Course => "course",
            EntityKind::Module => "module",
            EntityKind::Topic => "topic",
            EntityKind::User => "user",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LtsError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("step {step} is outside 1..={max_step}")]
    OutOfRange { step: i64, max_step: usize },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid storage document: {0}")]
    Document(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LtsError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        LtsError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// True for every error the boundary renders as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, LtsError::NotFound { .. } | LtsError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, LtsError>;
