//! # Outbound Ports (Driven Actors)
//!
//! Contracts for the collaborators the core *uses* but does not implement
//! the behaviour of.
//!
//! ## What belongs here?
//! * **[`store`]**: persistence. Lookups, journalled writes, commit/rollback.
//! * **[`images`]**: image bytes behind a cover reference.
//!
//! ## Rules
//! 1. All items here are traits.
//! 2. Concrete implementations live in [`crate::storage`] and [`crate::images`].
//! 3. Domain models appear freely in signatures.

pub mod images;
pub mod store;

pub use images::ImageStorage;
pub use store::{Store, UnitOfWork};
