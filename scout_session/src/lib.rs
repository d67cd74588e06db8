#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Durable conversation state for the scout assistant.
//!
//! Two layers:
//! - [`SqliteSessionStore`]: one append-only message log per conversation
//!   id, persisted in sqlite, surviving process restarts.
//! - [`SessionRegistry`]: in-memory cache of one [`SessionHandle`] per
//!   conversation id, safe under concurrent requests.
//!
//! The registry guard protects only the handle map; store I/O runs outside
//! it, except in [`SessionRegistry::clear`], which holds the guard across
//! the store delete and the eviction so a concurrent `get_or_create` can
//! never resurrect stale history.

mod entity;
mod registry;
mod store;

pub use registry::{SessionHandle, SessionRegistry};
pub use store::SqliteSessionStore;
