//! Conversation store port
//!
//! Keyed storage of session state for the lifetime of the process. The
//! request-handling logic only ever sees this trait, so alternate
//! backings (bounded eviction, external cache) can substitute without
//! touching the use cases.

use async_trait::async_trait;
use relay_domain::{Conversation, Message, SessionSummary};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-lifetime keyed storage of conversation state
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Store a new conversation under a freshly minted identifier and
    /// return that identifier.
    async fn create(&self, messages: Vec<Message>) -> String;

    /// Store a conversation under an externally issued identifier
    /// (provider-origin sessions). Replaces any previous record under
    /// the same identifier.
    async fn insert(&self, session_id: String, messages: Vec<Message>);

    /// Pure lookup; no side effects.
    async fn get(&self, session_id: &str) -> Option<Conversation>;

    /// Append one completed turn to an existing conversation. Returns
    /// `false` without mutating anything when the identifier is absent.
    async fn append_turn(&self, session_id: &str, user: Message, assistant: Message) -> bool;

    /// Snapshot of all sessions for observability. Iteration order is
    /// implementation-defined.
    async fn list(&self) -> Vec<SessionSummary>;

    /// Remove a conversation; returns whether one existed.
    async fn delete(&self, session_id: &str) -> bool;

    /// Per-session advisory lock. Holding the lock for the duration of a
    /// turn serializes concurrent turns on the same session; locks for
    /// different sessions are independent.
    async fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>>;
}
