//! Typed events streamed by the driver CLI.
//!
//! The driver is invoked once per exchange with `--output-format
//! stream-json` and emits one JSON object per line:
//!
//! - `system` — emitted first with `subtype: "init"`, carries the
//!   provider-issued `session_id` for this exchange.
//! - `assistant` — one per model message; `message.content` is a list of
//!   content chunks, of which only `text` chunks matter here.
//! - `result` — terminal event; `subtype: "success"` or an error subtype.
//! - anything else — skipped.

use crate::driver::error::DriverError;
use serde::Deserialize;

/// One event from the driver stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverEvent {
    System(SystemEvent),
    Assistant(AssistantEvent),
    Result(ResultEvent),
    Error(ErrorEvent),
    /// Event kinds this adapter does not consume (`user`, tool traffic,
    /// future additions). Skipped, never an error.
    #[serde(other)]
    Other,
}

/// Initial handshake event carrying the session identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemEvent {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SystemEvent {
    pub fn is_init(&self) -> bool {
        self.subtype.as_deref() == Some("init")
    }
}

/// A model message event.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantEvent {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<ContentChunk>,
}

impl AssistantEvent {
    /// Concatenate the text chunks of this message, in order.
    pub fn text(&self) -> String {
        self.message
            .content
            .iter()
            .filter_map(|chunk| match chunk {
                ContentChunk::Text { text } => Some(text.as_str()),
                ContentChunk::Other => None,
            })
            .collect()
    }
}

/// One chunk of an assistant message's content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentChunk {
    Text { text: String },
    /// Tool use and other non-text chunks; ignored for text extraction.
    #[serde(other)]
    Other,
}

/// Terminal event for one exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEvent {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ResultEvent {
    pub fn is_success(&self) -> bool {
        !self.is_error && self.subtype.as_deref().unwrap_or("success") == "success"
    }

    /// Human-readable failure description.
    pub fn failure_message(&self) -> String {
        self.result
            .clone()
            .or_else(|| self.subtype.clone())
            .unwrap_or_else(|| "unknown driver error".to_string())
    }
}

/// Out-of-band error event.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEvent {
    #[serde(default)]
    pub message: Option<String>,
}

/// Parse one line of driver output.
pub fn parse_event(line: &str) -> Result<DriverEvent, DriverError> {
    serde_json::from_str(line).map_err(|e| DriverError::ParseError {
        error: e.to_string(),
        raw: line.to_string(),
    })
}
