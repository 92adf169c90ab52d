//! Chat use case
//!
//! Orchestrates one chat turn: validate the query, resolve the session,
//! invoke the completion backend, persist the completed turn, shape the
//! outcome. An upstream failure aborts the turn before anything is
//! persisted — no partial session state is ever stored.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::conversation_store::ConversationStore;
use crate::resolver::SessionResolver;
use relay_domain::Message;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Errors surfaced by the chat use case
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// One inbound chat request.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub query: String,
    pub request_id: Option<String>,
    pub resume_session: Option<String>,
}

/// Shaped response payload for one completed turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub request_id: String,
    pub session_id: String,
    pub query: String,
    pub response: String,
    /// True iff the caller supplied `resume_session`. This reports caller
    /// intent, not whether the resume actually hit the store.
    pub is_continuation: bool,
}

/// Executes one chat turn against the configured backend
pub struct ChatUseCase {
    store: Arc<dyn ConversationStore>,
    gateway: Arc<dyn CompletionGateway>,
    resolver: SessionResolver,
    system_prompt: String,
}

impl ChatUseCase {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        gateway: Arc<dyn CompletionGateway>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let resolver = SessionResolver::new(store.clone());
        Self {
            store,
            gateway,
            resolver,
            system_prompt: system_prompt.into(),
        }
    }

    pub async fn execute(&self, input: ChatInput) -> Result<ChatOutcome, ChatError> {
        let query = input.query.trim();
        if query.is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        let request_id = input
            .request_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let resume = input
            .resume_session
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        // Serialize turns on the same session. The guard is held across
        // the upstream call so an interleaved request on this session
        // cannot observe a half-committed history. Fresh sessions have no
        // key to contend on.
        let lock = match resume {
            Some(id) => Some(self.store.turn_lock(id).await),
            None => None,
        };
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let resolved = self.resolver.resolve(resume, query).await;

        info!(
            request_id = %request_id,
            resume = resolved.resume_requested,
            history = resolved.messages.len() - 1,
            "Processing chat request"
        );

        let request = CompletionRequest::new(self.system_prompt.clone(), resolved.messages.clone())
            .with_resume(resolved.resumed_id.clone());

        let completion = self.gateway.complete(request).await.map_err(|e| {
            error!(request_id = %request_id, "Completion failed: {}", e);
            e
        })?;

        let user = Message::user(query);
        let assistant = Message::assistant(completion.text.clone());

        let session_id = self
            .persist_turn(
                completion.provider_session_id,
                resolved.resumed_id,
                resolved.messages,
                user,
                assistant,
            )
            .await;

        info!(
            request_id = %request_id,
            session_id = %session_id,
            chars = completion.text.len(),
            "Chat turn completed"
        );

        Ok(ChatOutcome {
            request_id,
            session_id,
            query: query.to_string(),
            response: completion.text,
            is_continuation: resolved.resume_requested,
        })
    }

    /// Commit the completed turn and decide the final session identifier:
    /// a provider-issued id wins, then a resumed id, then a store-minted
    /// one.
    async fn persist_turn(
        &self,
        provider_id: Option<String>,
        resumed_id: Option<String>,
        mut working_history: Vec<Message>,
        user: Message,
        assistant: Message,
    ) -> String {
        working_history.push(assistant.clone());

        if let Some(id) = provider_id {
            self.store.insert(id.clone(), working_history).await;
            return id;
        }

        if let Some(id) = resumed_id {
            if self.store.append_turn(&id, user, assistant).await {
                return id;
            }
            // The session vanished between resolution and commit; store
            // the full working history under the same identifier.
            self.store.insert(id.clone(), working_history).await;
            return id;
        }

        self.store.create(working_history).await
    }
}
