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

//! Web search via SerpAPI.
//!
//! One client, three call shapes: plain web search, and the sports and
//! finance variants that season the query toward current results before
//! hitting the same engine.

mod serpapi;

pub use serpapi::{SearchKind, SerpApiClient, format_results};
