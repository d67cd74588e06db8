use scout_core::{Responder, SessionStorage, StructuredAnswer};
use scout_session::SessionRegistry;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::profile::AgentProfile;

/// Errors that can escape a chat turn. Responder failures never appear
/// here; they are recovered into a degraded answer inside [`Orchestrator::chat`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Storage unavailable: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Result of one completed chat turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub answer: StructuredAnswer,
    pub conversation_id: String,
}

/// Drives chat turns for one agent specialization against the shared
/// session registry. Constructed once at startup; the process holds one
/// instance per specialization.
pub struct Orchestrator<R = Arc<dyn Responder>, S = Arc<dyn SessionStorage>>
where
    R: Responder,
    S: SessionStorage + Clone,
{
    profile: AgentProfile,
    responder: R,
    registry: Arc<SessionRegistry<S>>,
}

impl<R, S> Orchestrator<R, S>
where
    R: Responder,
    S: SessionStorage + Clone,
{
    pub fn new(profile: AgentProfile, responder: R, registry: Arc<SessionRegistry<S>>) -> Self {
        Self {
            profile,
            responder,
            registry,
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Run one chat turn.
    ///
    /// The conversation id is resolved first, before any fallible work, so
    /// callers always get a usable id back. On responder success the
    /// user/assistant pair is recorded as one durable write; on responder
    /// failure nothing is recorded and a degraded answer is returned with
    /// the same id.
    pub async fn chat(
        &self,
        conversation_id: Option<String>,
        message: &str,
    ) -> Result<ChatTurn, ChatError> {
        let conversation_id =
            conversation_id.unwrap_or_else(|| Uuid::now_v7().to_string());

        let handle = self.registry.get_or_create(&conversation_id).await;
        let history = handle.load().await.map_err(ChatError::Storage)?;

        info!(
            "{}: turn {} for conversation {}",
            self.profile.name,
            history.len() / 2 + 1,
            conversation_id
        );

        match self.responder.respond(&history, message).await {
            Ok(answer) => {
                let serialized =
                    serde_json::to_string(&answer).map_err(|e| ChatError::Storage(e.into()))?;
                handle
                    .append_turn(message, &serialized)
                    .await
                    .map_err(ChatError::Storage)?;

                Ok(ChatTurn {
                    answer,
                    conversation_id,
                })
            }
            Err(e) => {
                error!("{}: responder failed: {e:#}", self.profile.name);
                Ok(ChatTurn {
                    answer: StructuredAnswer::degraded(&e),
                    conversation_id,
                })
            }
        }
    }

    /// Run the profile's canned overview prompt in a fresh conversation.
    pub async fn initial_summary(&self) -> Result<ChatTurn, ChatError> {
        self.chat(None, self.profile.summary_prompt).await
    }

    /// Tear down one conversation: durable log deleted, handle evicted.
    /// Idempotent, including for ids that never existed.
    pub async fn clear_conversation(&self, conversation_id: &str) -> Result<(), ChatError> {
        self.registry
            .clear(conversation_id)
            .await
            .map_err(ChatError::Storage)?;

        info!("{}: cleared conversation {}", self.profile.name, conversation_id);
        Ok(())
    }
}
