#![warn(
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

//! Multi-turn conversation orchestration.
//!
//! The [`Orchestrator`] drives one chat turn end-to-end: resolve the
//! conversation id, obtain the session handle, hand the full history to
//! the responder, and record the completed turn. Responder failures are
//! recovered into a degraded answer here and never escape; storage
//! failures are the only errors that do.

mod orchestrator;
mod profile;
mod prompts;

pub use orchestrator::{ChatError, ChatTurn, Orchestrator};
pub use profile::AgentProfile;
