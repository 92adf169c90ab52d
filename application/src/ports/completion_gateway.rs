//! Completion gateway port
//!
//! Defines the interface for sending a message history to an LLM backend
//! and getting the assembled text back. Implementations (adapters) live
//! in the infrastructure layer.

use async_trait::async_trait;
use relay_domain::{Message, SessionOrigin};
use thiserror::Error;

/// Errors that can occur during completion gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion exchange sent upstream.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction sent out of band (not part of the history).
    pub system_prompt: String,
    /// Full ordered history including the new user message.
    pub messages: Vec<Message>,
    /// Provider-side session identifier to resume, when the backend
    /// supports server-held conversation state.
    pub resume: Option<String>,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
            resume: None,
        }
    }

    pub fn with_resume(mut self, resume: Option<String>) -> Self {
        self.resume = resume;
        self
    }
}

/// Result of one completion exchange.
///
/// `text` is the concatenation of all text segments in the upstream
/// response, in order, joined without separator. Non-text segments are
/// ignored.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Conversation identifier issued by the provider, when the backend's
    /// [`SessionOrigin`] is `Provider`.
    pub provider_session_id: Option<String>,
}

impl Completion {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider_session_id: None,
        }
    }
}

/// Gateway for LLM completion calls
///
/// One call per turn; failures are not retried and propagate to the
/// caller with the provider's message.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Where this backend's session identifiers come from.
    fn origin(&self) -> SessionOrigin;

    /// Execute one completion call.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_carries_resume() {
        let req = CompletionRequest::new("system", vec![Message::user("hi")])
            .with_resume(Some("sess-1".to_string()));
        assert_eq!(req.system_prompt, "system");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.resume.as_deref(), Some("sess-1"));
    }

    #[test]
    fn completion_from_text_has_no_provider_id() {
        let completion = Completion::from_text("hello");
        assert_eq!(completion.text, "hello");
        assert!(completion.provider_session_id.is_none());
    }
}
