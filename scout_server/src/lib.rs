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

//! HTTP API for the scout assistant (Axum).
//!
//! One route set, three orchestrator bindings: `/chat` for the general
//! agent and `/chat/sports`, `/chat/finance` for the specializations,
//! plus conversation teardown and a direct search endpoint for debugging.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{delete, get, post};
use state::AppState;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the application router with all routes.
pub fn app_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/chat", post(routes::chat))
        .route("/chat/sports", post(routes::chat_sports))
        .route("/chat/sports/summary", get(routes::sports_summary))
        .route("/chat/finance", post(routes::chat_finance))
        .route("/chat/finance/summary", get(routes::finance_summary))
        .route("/search", post(routes::direct_search))
        .route(
            "/conversations/{thread_id}",
            delete(routes::clear_conversation),
        )
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
