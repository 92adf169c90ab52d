//! Session resolution
//!
//! Translates an inbound request's optional `resume_session` field into
//! the working message history for one upstream call. Resuming an
//! unknown or expired session never fails the request: it degrades to a
//! fresh conversation and the miss is logged.

use crate::ports::conversation_store::ConversationStore;
use relay_domain::Message;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of resolving a chat request against the store.
///
/// `messages` is a working copy: the stored history (if any) plus the new
/// user message. Nothing is persisted until the turn commits.
#[derive(Debug)]
pub struct ResolvedConversation {
    /// Identifier of the resumed session, when the lookup hit.
    pub resumed_id: Option<String>,
    /// History to send upstream, ending with the new user message.
    pub messages: Vec<Message>,
    /// Whether the caller asked for a continuation at all. Drives the
    /// `is_continuation` response flag regardless of hit or miss.
    pub resume_requested: bool,
}

/// Decides between continuing an existing conversation and starting fresh
pub struct SessionResolver {
    store: Arc<dyn ConversationStore>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Resolve `resume_session` and build the working history for `query`.
    pub async fn resolve(
        &self,
        resume_session: Option<&str>,
        query: &str,
    ) -> ResolvedConversation {
        let requested = resume_session.map(str::trim).filter(|s| !s.is_empty());

        let (resumed_id, mut messages) = match requested {
            None => (None, Vec::new()),
            Some(id) => match self.store.get(id).await {
                Some(conversation) => {
                    debug!(
                        session_id = %id,
                        messages = conversation.messages.len(),
                        "Resuming session"
                    );
                    (Some(id.to_string()), conversation.messages)
                }
                None => {
                    // Deliberate fallback: an unknown resume target starts
                    // a fresh conversation instead of failing the request.
                    warn!(session_id = %id, "Resume target not found, starting fresh session");
                    (None, Vec::new())
                }
            },
        };

        messages.push(Message::user(query));

        ResolvedConversation {
            resumed_id,
            messages,
            resume_requested: requested.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::InMemoryStore;
    use relay_domain::Role;

    fn resolver_with_store() -> (SessionResolver, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::default());
        (SessionResolver::new(store.clone()), store)
    }

    #[tokio::test]
    async fn fresh_conversation_when_no_resume() {
        let (resolver, _store) = resolver_with_store();
        let resolved = resolver.resolve(None, "hello").await;

        assert!(resolved.resumed_id.is_none());
        assert!(!resolved.resume_requested);
        assert_eq!(resolved.messages.len(), 1);
        assert_eq!(resolved.messages[0].role, Role::User);
        assert_eq!(resolved.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn blank_resume_is_treated_as_fresh() {
        let (resolver, _store) = resolver_with_store();
        let resolved = resolver.resolve(Some("   "), "hello").await;

        assert!(resolved.resumed_id.is_none());
        assert!(!resolved.resume_requested);
    }

    #[tokio::test]
    async fn resume_hit_copies_stored_history() {
        let (resolver, store) = resolver_with_store();
        let id = store
            .create(vec![Message::user("q1"), Message::assistant("a1")])
            .await;

        let resolved = resolver.resolve(Some(&id), "q2").await;

        assert_eq!(resolved.resumed_id.as_deref(), Some(id.as_str()));
        assert!(resolved.resume_requested);
        assert_eq!(resolved.messages.len(), 3);
        assert_eq!(resolved.messages[2].content, "q2");

        // Resolution must not mutate stored state before the turn commits.
        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.messages.len(), 2);
    }

    #[tokio::test]
    async fn resume_miss_degrades_to_fresh_but_keeps_intent() {
        let (resolver, _store) = resolver_with_store();
        let resolved = resolver.resolve(Some("no-such-session"), "hello").await;

        assert!(resolved.resumed_id.is_none());
        assert!(resolved.resume_requested);
        assert_eq!(resolved.messages.len(), 1);
    }
}
