//! Conversation domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation (Entity)
///
/// Immutable once appended to a conversation's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A server-resident conversation record (Entity)
///
/// Holds the ordered message history for one session, plus a redundant
/// cache of the latest query/response pair for cheap listing. Messages
/// are never reordered or deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub last_query: String,
    pub last_response: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a conversation from an already-completed history.
    ///
    /// The tail cache is derived from the last user/assistant messages
    /// present in `messages`.
    pub fn new(session_id: impl Into<String>, messages: Vec<Message>) -> Self {
        let now = Utc::now();
        let last_query = last_content(&messages, Role::User);
        let last_response = last_content(&messages, Role::Assistant);
        Self {
            session_id: session_id.into(),
            messages,
            last_query,
            last_response,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append one completed turn: the user message followed by the
    /// assistant message, refreshing the tail cache and `updated_at`.
    pub fn append_turn(&mut self, user: Message, assistant: Message) {
        self.last_query = user.content.clone();
        self.last_response = assistant.content.clone();
        self.messages.push(user);
        self.messages.push(assistant);
        self.updated_at = Utc::now();
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Listing view of this conversation.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            last_query: self.last_query.clone(),
            timestamp: self.updated_at,
        }
    }
}

/// One row of the session listing snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub last_query: String,
    pub timestamp: DateTime<Utc>,
}

fn last_content(messages: &[Message], role: Role) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == role)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_tail_cache_from_history() {
        let conv = Conversation::new(
            "s1",
            vec![Message::user("hello"), Message::assistant("hi there")],
        );
        assert_eq!(conv.last_query, "hello");
        assert_eq!(conv.last_response, "hi there");
        assert_eq!(conv.message_count(), 2);
    }

    #[test]
    fn append_turn_keeps_insertion_order() {
        let mut conv = Conversation::new(
            "s1",
            vec![Message::user("q1"), Message::assistant("a1")],
        );
        conv.append_turn(Message::user("q2"), Message::assistant("a2"));

        assert_eq!(conv.message_count(), 4);
        assert_eq!(conv.messages[2].role, Role::User);
        assert_eq!(conv.messages[2].content, "q2");
        assert_eq!(conv.messages[3].role, Role::Assistant);
        assert_eq!(conv.messages[3].content, "a2");
        assert_eq!(conv.last_query, "q2");
        assert_eq!(conv.last_response, "a2");
    }

    #[test]
    fn append_turn_bumps_updated_at() {
        let mut conv = Conversation::new("s1", vec![]);
        let created = conv.created_at;
        conv.append_turn(Message::user("q"), Message::assistant("a"));
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        let json = serde_json::to_value(Message::assistant("yo")).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn summary_reflects_latest_turn() {
        let mut conv = Conversation::new(
            "s1",
            vec![Message::user("first"), Message::assistant("r1")],
        );
        conv.append_turn(Message::user("second"), Message::assistant("r2"));
        let summary = conv.summary();
        assert_eq!(summary.session_id, "s1");
        assert_eq!(summary.last_query, "second");
        assert_eq!(summary.timestamp, conv.updated_at);
    }
}
