//! Request handlers.
//!
//! Every chat turn answers 200 with a well-formed body; a responder
//! failure arrives as a degraded answer in the same shape. Only storage
//! outages surface as 5xx.

use axum::Json;
use axum::extract::{Path, Query, State};
use scout_conversation::{ChatTurn, Orchestrator};
use scout_core::{SearchResult, StructuredAnswer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: StructuredAnswer,
    pub thread_id: String,
}

impl From<ChatTurn> for ChatResponse {
    fn from(turn: ChatTurn) -> Self {
        Self {
            response: turn.answer,
            thread_id: turn.conversation_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

const fn default_num_results() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "scout is running".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running properly".to_string(),
    })
}

async fn run_chat(
    orchestrator: &Orchestrator,
    request: ChatRequest,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let turn = orchestrator
        .chat(request.thread_id, &request.message)
        .await?;
    Ok(Json(turn.into()))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    run_chat(&state.general, request).await
}

pub async fn chat_sports(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    run_chat(&state.sports, request).await
}

pub async fn chat_finance(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    run_chat(&state.finance, request).await
}

pub async fn sports_summary(
    State(state): State<AppState>,
) -> Result<Json<ChatResponse>, ApiError> {
    let turn = state.sports.initial_summary().await?;
    Ok(Json(turn.into()))
}

pub async fn finance_summary(
    State(state): State<AppState>,
) -> Result<Json<ChatResponse>, ApiError> {
    let turn = state.finance.initial_summary().await?;
    Ok(Json(turn.into()))
}

pub async fn direct_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state.search.search(&params.query, params.num_results).await?;
    Ok(Json(SearchResponse {
        query: params.query,
        results,
    }))
}

pub async fn clear_conversation(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.general.clear_conversation(&thread_id).await?;

    info!("Conversation deleted: {}", thread_id);
    Ok(Json(DeleteResponse {
        message: format!("Conversation {thread_id} cleared"),
    }))
}
