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

//! Configuration for the scout assistant.
//!
//! Config lives at `~/.scout/config.json`; the API credentials may also be
//! supplied through `OPENAI_API_KEY` / `SERP_API_KEY`, which take priority
//! over the file. Startup must call [`Config::validate`] so a missing
//! credential stops the process instead of failing per-request.

mod schema;

pub use schema::{
    AgentDefaults, AgentsConfig, Config, DatabaseConfig, ProviderConfig, ProvidersConfig,
    SearchConfig, ServerConfig,
};
