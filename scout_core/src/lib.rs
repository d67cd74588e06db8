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

//! Shared vocabulary types and capability seams for the scout assistant.
//!
//! Everything stateful or remote sits behind one of three traits:
//! [`SessionStorage`] (durable conversation logs), [`Responder`] (the
//! answer-synthesis pipeline), and [`SearchProvider`] (ranked web results).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            "tool" => Ok(Self::Tool),
            other => Err(anyhow::anyhow!("Unknown role: {other}")),
        }
    }
}

/// One turn of a conversation. Immutable once written to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A source citation with title and URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// The structured output produced once per chat turn: a synthesized
/// summary plus the sources it drew on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredAnswer {
    pub summary: String,
    pub sources: Vec<Source>,
}

impl StructuredAnswer {
    /// Well-formed fallback answer for a failed turn. The failure cause
    /// goes into the summary text; sources stay empty.
    #[must_use]
    pub fn degraded(cause: &impl std::fmt::Display) -> Self {
        Self {
            summary: format!(
                "I encountered an error while processing your request: {cause}"
            ),
            sources: Vec::new(),
        }
    }
}

/// One ranked record from a search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Durable, append-only message log keyed by conversation id.
///
/// `load` on an unknown id returns an empty history, never an error.
/// `append`/`clear` must be atomic per id; errors mean the backing
/// storage is unavailable and propagate unchanged.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Vec<ChatMessage>>;

    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
    ) -> anyhow::Result<()>;

    /// Record a full user/assistant turn. Implementations that can batch
    /// both writes durably should override this; the default is two
    /// sequential appends.
    async fn append_turn(
        &self,
        conversation_id: &str,
        user_content: &str,
        assistant_content: &str,
    ) -> anyhow::Result<()> {
        self.append(conversation_id, Role::User, user_content).await?;
        self.append(conversation_id, Role::Assistant, assistant_content)
            .await
    }

    async fn clear(&self, conversation_id: &str) -> anyhow::Result<()>;
}

/// The answer-synthesis capability: given the prior history and a new
/// user message, produce a structured answer. May call a search provider
/// internally; that is opaque to callers.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> anyhow::Result<StructuredAnswer>;
}

/// Ranked web search capability.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>>;
}

#[async_trait]
impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Vec<ChatMessage>> {
        (**self).load(conversation_id).await
    }

    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
    ) -> anyhow::Result<()> {
        (**self).append(conversation_id, role, content).await
    }

    async fn append_turn(
        &self,
        conversation_id: &str,
        user_content: &str,
        assistant_content: &str,
    ) -> anyhow::Result<()> {
        (**self)
            .append_turn(conversation_id, user_content, assistant_content)
            .await
    }

    async fn clear(&self, conversation_id: &str) -> anyhow::Result<()> {
        (**self).clear(conversation_id).await
    }
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> anyhow::Result<StructuredAnswer> {
        (**self).respond(history, message).await
    }
}

#[async_trait]
impl<T: SearchProvider + ?Sized> SearchProvider for Arc<T> {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>> {
        (**self).search(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let back: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(back, Role::User);
    }

    #[test]
    fn degraded_answer_is_well_formed() {
        let err = anyhow::anyhow!("search backend timed out");
        let answer = StructuredAnswer::degraded(&err);

        assert!(answer.summary.contains("search backend timed out"));
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn search_result_omits_missing_date() {
        let result = SearchResult {
            title: "Title".to_string(),
            url: "https://example.com".to_string(),
            snippet: "Snippet".to_string(),
            source: "example.com".to_string(),
            date: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("date").is_none());
    }
}
