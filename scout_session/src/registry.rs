//! In-memory registry of live session handles.
//!
//! One logical handle per conversation id at any instant. Handles are
//! stateless pass-throughs to the store, so eviction only reclaims the
//! cache entry; the durable log is untouched and a later `get_or_create`
//! reconstructs the same history from it.

use scout_core::{ChatMessage, Role, SessionStorage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Live handle for one conversation, bound to the backing store.
#[derive(Clone)]
pub struct SessionHandle<S = Arc<dyn SessionStorage>>
where
    S: SessionStorage + Clone,
{
    conversation_id: String,
    store: S,
}

impl<S> SessionHandle<S>
where
    S: SessionStorage + Clone,
{
    fn new(conversation_id: &str, store: S) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            store,
        }
    }

    #[must_use]
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Full history in insertion order; empty for a fresh conversation.
    pub async fn load(&self) -> anyhow::Result<Vec<ChatMessage>> {
        self.store.load(&self.conversation_id).await
    }

    pub async fn append(&self, role: Role, content: &str) -> anyhow::Result<()> {
        self.store.append(&self.conversation_id, role, content).await
    }

    /// Record a complete user/assistant turn as one durable write.
    pub async fn append_turn(
        &self,
        user_content: &str,
        assistant_content: &str,
    ) -> anyhow::Result<()> {
        self.store
            .append_turn(&self.conversation_id, user_content, assistant_content)
            .await
    }
}

/// Process-wide cache mapping conversation id to its single live handle.
pub struct SessionRegistry<S = Arc<dyn SessionStorage>>
where
    S: SessionStorage + Clone,
{
    store: S,
    handles: Mutex<HashMap<String, SessionHandle<S>>>,
}

impl<S> SessionRegistry<S>
where
    S: SessionStorage + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached handle for this id, creating it if absent.
    ///
    /// Creation is lazy and does no I/O; the durable log materializes on
    /// first append. Two concurrent calls with the same id always resolve
    /// to the same cached handle.
    pub async fn get_or_create(&self, conversation_id: &str) -> SessionHandle<S> {
        let mut handles = self.handles.lock().await;
        handles
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                debug!("Creating session handle for conversation: {conversation_id}");
                SessionHandle::new(conversation_id, self.store.clone())
            })
            .clone()
    }

    /// Drop the cached handle without touching durable data.
    pub async fn evict(&self, conversation_id: &str) {
        self.handles.lock().await.remove(conversation_id);
    }

    /// Delete the durable log and evict the handle.
    ///
    /// The guard is held across both steps: a concurrent `get_or_create`
    /// either sees the old handle before the log is deleted or a fresh
    /// handle over an empty log, never a transient in-between state.
    /// Idempotent, including for ids that were never used.
    pub async fn clear(&self, conversation_id: &str) -> anyhow::Result<()> {
        let mut handles = self.handles.lock().await;
        self.store.clear(conversation_id).await?;
        handles.remove(conversation_id);
        Ok(())
    }

    /// Number of currently cached handles.
    pub async fn cached(&self) -> usize {
        self.handles.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scout_core::ChatMessage;

    /// Minimal in-memory store for registry-only tests.
    #[derive(Default)]
    struct MemoryStore {
        logs: Mutex<HashMap<String, Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl SessionStorage for MemoryStore {
        async fn load(&self, conversation_id: &str) -> anyhow::Result<Vec<ChatMessage>> {
            Ok(self
                .logs
                .lock()
                .await
                .get(conversation_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn append(
            &self,
            conversation_id: &str,
            role: Role,
            content: &str,
        ) -> anyhow::Result<()> {
            self.logs
                .lock()
                .await
                .entry(conversation_id.to_string())
                .or_default()
                .push(ChatMessage::new(role, content));
            Ok(())
        }

        async fn clear(&self, conversation_id: &str) -> anyhow::Result<()> {
            self.logs.lock().await.remove(conversation_id);
            Ok(())
        }
    }

    fn registry() -> SessionRegistry<Arc<dyn SessionStorage>> {
        SessionRegistry::new(Arc::new(MemoryStore::default()) as Arc<dyn SessionStorage>)
    }

    #[tokio::test]
    async fn get_or_create_caches_one_handle_per_id() {
        let registry = registry();

        registry.get_or_create("a").await;
        registry.get_or_create("a").await;
        registry.get_or_create("b").await;

        assert_eq!(registry.cached().await, 2);
    }

    #[tokio::test]
    async fn concurrent_callers_observe_one_history() {
        let registry = Arc::new(registry());

        let mut joins = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            joins.push(tokio::spawn(async move {
                registry.get_or_create("shared").await
            }));
        }

        let handles: Vec<_> = futures_join(joins).await;
        handles[0].append(Role::User, "hello").await.unwrap();

        for handle in &handles {
            let history = handle.load().await.unwrap();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].content, "hello");
        }
        assert_eq!(registry.cached().await, 1);
    }

    #[tokio::test]
    async fn evict_keeps_durable_log() {
        let registry = registry();

        let handle = registry.get_or_create("kept").await;
        handle.append(Role::User, "still here").await.unwrap();

        registry.evict("kept").await;
        assert_eq!(registry.cached().await, 0);

        let reloaded = registry.get_or_create("kept").await;
        let history = reloaded.load().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "still here");
    }

    #[tokio::test]
    async fn clear_removes_log_and_handle() {
        let registry = registry();

        let handle = registry.get_or_create("gone").await;
        handle.append(Role::User, "bye").await.unwrap();

        registry.clear("gone").await.unwrap();
        assert_eq!(registry.cached().await, 0);

        let history = registry.get_or_create("gone").await.load().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn clear_unknown_id_succeeds() {
        let registry = registry();
        registry.clear("never-used").await.unwrap();
    }

    async fn futures_join<T>(joins: Vec<tokio::task::JoinHandle<T>>) -> Vec<T> {
        let mut out = Vec::with_capacity(joins.len());
        for join in joins {
            out.push(join.await.unwrap());
        }
        out
    }
}
