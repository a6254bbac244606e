//! # Domain Models
//!
//! The entities the progression core works on.
//!
//! ## Core Entities
//! * [`content::Course`], [`content::Module`], [`content::Topic`]: the content
//!   hierarchy. Containment is expressed by ordered id lists on the parent and
//!   a back-reference id on the child.
//! * [`user::User`]: a learner, keyed by email for login.
//!
//! ## Value Objects
//! * [`ids`]: typed identifiers, one per entity kind.
//! * [`image::Image`]: a reference to stored cover-image bytes.
//!
//! Relations between users and content (completion, enrollment) are not fields
//! on these structs; they live in their own stores in `lts-core`.

pub mod content;
pub mod ids;
pub mod image;
pub mod user;
