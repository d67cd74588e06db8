//! End-to-end orchestrator behavior over the real sqlite store with a
//! scripted responder: turn recording, degraded answers, follow-up
//! context, and teardown idempotence.

use async_trait::async_trait;
use scout_conversation::{AgentProfile, Orchestrator};
use scout_core::{
    ChatMessage, Responder, Role, SessionStorage, Source, StructuredAnswer,
};
use scout_session::{SessionRegistry, SqliteSessionStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;
use tokio::sync::Mutex;

/// Responder double: records every history it is handed and can be
/// switched into a failing mode.
struct ScriptedResponder {
    seen_histories: Mutex<Vec<Vec<ChatMessage>>>,
    fail: AtomicBool,
}

impl ScriptedResponder {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen_histories: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    fn fail_next(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    async fn last_history(&self) -> Vec<ChatMessage> {
        self.seen_histories
            .lock()
            .await
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> anyhow::Result<StructuredAnswer> {
        self.seen_histories.lock().await.push(history.to_vec());

        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("search backend unreachable");
        }

        Ok(StructuredAnswer {
            summary: format!("answer to: {message}"),
            sources: vec![Source {
                title: "Example".to_string(),
                url: "https://example.com".to_string(),
            }],
        })
    }
}

async fn orchestrator() -> (
    TempDir,
    Arc<ScriptedResponder>,
    Arc<SqliteSessionStore>,
    Orchestrator,
) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("conversations.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = Arc::new(
        SqliteSessionStore::new(&url)
            .await
            .expect("Failed to open session store"),
    );
    let registry = Arc::new(SessionRegistry::new(
        store.clone() as Arc<dyn SessionStorage>,
    ));

    let responder = ScriptedResponder::new();
    let orchestrator = Orchestrator::new(
        AgentProfile::general(),
        responder.clone() as Arc<dyn Responder>,
        registry,
    );

    (dir, responder, store, orchestrator)
}

#[tokio::test]
async fn chat_records_user_then_assistant() {
    let (_dir, _responder, store, orchestrator) = orchestrator().await;

    let turn = orchestrator
        .chat(Some("t1".to_string()), "hello")
        .await
        .unwrap();

    assert_eq!(turn.conversation_id, "t1");
    assert_eq!(turn.answer.summary, "answer to: hello");

    let history = store.load("t1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "hello");
    assert_eq!(history[1].role, Role::Assistant);

    let recorded: StructuredAnswer = serde_json::from_str(&history[1].content).unwrap();
    assert_eq!(recorded.summary, "answer to: hello");
    assert_eq!(recorded.sources.len(), 1);
}

#[tokio::test]
async fn missing_id_generates_fresh_conversation() {
    let (_dir, _responder, store, orchestrator) = orchestrator().await;

    let turn = orchestrator
        .chat(None, "What's the weather?")
        .await
        .unwrap();

    assert!(!turn.conversation_id.is_empty());
    assert_ne!(turn.conversation_id, "error");
    uuid::Uuid::parse_str(&turn.conversation_id).expect("Generated id should be a uuid");

    let history = store.load(&turn.conversation_id).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn follow_up_hands_prior_turn_to_responder() {
    let (_dir, responder, _store, orchestrator) = orchestrator().await;

    let first = orchestrator
        .chat(None, "What's the weather?")
        .await
        .unwrap();
    let id = first.conversation_id.clone();

    orchestrator
        .chat(Some(id), "And tomorrow?")
        .await
        .unwrap();

    let history = responder.last_history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "What's the weather?");
    assert_eq!(history[1].role, Role::Assistant);
}

#[tokio::test]
async fn responder_failure_degrades_and_records_nothing() {
    let (_dir, responder, store, orchestrator) = orchestrator().await;

    responder.fail_next(true);
    let turn = orchestrator
        .chat(Some("broken".to_string()), "hello")
        .await
        .unwrap();

    assert_eq!(turn.conversation_id, "broken");
    assert!(turn.answer.summary.contains("search backend unreachable"));
    assert!(turn.answer.sources.is_empty());

    assert!(store.load("broken").await.unwrap().is_empty());

    // The next successful turn starts from a clean history.
    responder.fail_next(false);
    orchestrator
        .chat(Some("broken".to_string()), "retry")
        .await
        .unwrap();
    assert!(responder.last_history().await.is_empty());
    assert_eq!(store.load("broken").await.unwrap().len(), 2);
}

#[tokio::test]
async fn initial_summary_runs_canned_prompt_in_fresh_conversation() {
    let (_dir, responder, _store, orchestrator) = orchestrator().await;

    let first = orchestrator.initial_summary().await.unwrap();
    let second = orchestrator.initial_summary().await.unwrap();

    assert_ne!(first.conversation_id, second.conversation_id);
    assert!(responder.last_history().await.is_empty());
    assert!(
        first
            .answer
            .summary
            .contains(AgentProfile::general().summary_prompt)
    );
}

#[tokio::test]
async fn clear_conversation_is_idempotent() {
    let (_dir, _responder, store, orchestrator) = orchestrator().await;

    // Never-used id clears without error.
    orchestrator.clear_conversation("abc").await.unwrap();

    orchestrator
        .chat(Some("abc".to_string()), "hello")
        .await
        .unwrap();
    orchestrator.clear_conversation("abc").await.unwrap();
    orchestrator.clear_conversation("abc").await.unwrap();

    assert!(store.load("abc").await.unwrap().is_empty());
}
