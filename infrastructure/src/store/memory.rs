//! In-memory conversation store
//!
//! Process-lifetime storage: a `RwLock`-guarded map of conversation
//! records plus a lazily populated table of per-session advisory locks.
//! Cleared on restart; no TTL or eviction.

use async_trait::async_trait;
use relay_application::ConversationStore;
use relay_domain::{Conversation, Message, SessionSummary};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// In-memory session store keyed by session identifier.
#[derive(Default)]
pub struct MemoryConversationStore {
    sessions: RwLock<HashMap<String, Conversation>>,
    /// Advisory per-session locks. Never pruned: entries are two pointers
    /// each and the key space is bounded by the number of sessions seen.
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn create(&self, messages: Vec<Message>) -> String {
        // Generated ids are assumed unique given the UUID space; no
        // collision check against existing keys.
        let id = Uuid::new_v4().to_string();
        let conversation = Conversation::new(id.clone(), messages);
        self.sessions.write().await.insert(id.clone(), conversation);
        debug!(session_id = %id, "Created session");
        id
    }

    async fn insert(&self, session_id: String, messages: Vec<Message>) {
        let conversation = Conversation::new(session_id.clone(), messages);
        let replaced = self
            .sessions
            .write()
            .await
            .insert(session_id.clone(), conversation);
        debug!(
            session_id = %session_id,
            replaced = replaced.is_some(),
            "Stored session under external identifier"
        );
    }

    async fn get(&self, session_id: &str) -> Option<Conversation> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn append_turn(&self, session_id: &str, user: Message, assistant: Message) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(conversation) => {
                conversation.append_turn(user, assistant);
                true
            }
            None => false,
        }
    }

    async fn list(&self) -> Vec<SessionSummary> {
        self.sessions
            .read()
            .await
            .values()
            .map(|c| c.summary())
            .collect()
    }

    async fn delete(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    async fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.turn_locks
            .lock()
            .await
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }
}
