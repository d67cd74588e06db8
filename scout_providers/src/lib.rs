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

//! Responder implementations.
//!
//! [`OpenAiResponder`] drives an OpenAI-compatible chat-completions API
//! with a bounded `web_search` tool loop and decodes the final message
//! into a [`scout_core::StructuredAnswer`].

mod openai;
mod retry;

pub use openai::OpenAiResponder;
pub use retry::retry_with_backoff;
