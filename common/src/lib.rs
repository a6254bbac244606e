//! Shared vocabulary of the `lts` workspace.
//!
//! * [`models`]: courses, modules, topics, users and the ids that address them.
//! * [`error`]: the error taxonomy every core operation reports with.
//! * [`config`]: runtime settings assembled by the binary.

pub mod config;
pub mod error;
pub mod models;

pub use error::{LtsError, Result};
