//! # Storage Adapters
//!
//! Concrete implementations of the [`Store`](crate::ports::Store) port.
//!
//! * [`memory::MemoryStore`]: keeps the learning state in process and,
//!   optionally, mirrors every commit into a JSON document on disk.
//! * [`document::Document`]: the on-disk JSON form of the whole state.

pub mod document;
pub mod memory;

pub use document::Document;
pub use memory::MemoryStore;
