//! # lts-core
//!
//! Course progression and completion tracking, arranged the hexagonal way:
//!
//! * **Domain** (pure, no IO): [`hierarchy`], [`ledger`], [`progress`],
//!   [`navigator`], [`enrollment`], and [`state`] which bundles them.
//! * **Ports**: [`ports`] defines the store and image-storage contracts.
//! * **Adapters**: [`storage`] and [`images`] implement those contracts.
//! * **Application**: [`services`] runs each use case inside one unit of work;
//!   [`routes`] maps the request surface onto the services.

pub mod enrollment;
pub mod hierarchy;
pub mod images;
pub mod ledger;
pub mod navigator;
pub mod ports;
pub mod progress;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use routes::{Response, Route, Router};
