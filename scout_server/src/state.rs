//! Application state shared across all handlers.
//!
//! Constructed once at startup and cloned per request. The three
//! orchestrators share one session registry (and so one durable store);
//! they differ only in their responder binding.

use scout_conversation::Orchestrator;
use scout_core::SearchProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub general: Arc<Orchestrator>,
    pub sports: Arc<Orchestrator>,
    pub finance: Arc<Orchestrator>,
    pub search: Arc<dyn SearchProvider>,
}

impl AppState {
    pub fn new(
        general: Arc<Orchestrator>,
        sports: Arc<Orchestrator>,
        finance: Arc<Orchestrator>,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        Self {
            general,
            sports,
            finance,
            search,
        }
    }
}
