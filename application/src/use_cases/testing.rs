//! Test doubles shared by the application-layer unit tests.

use crate::ports::command_source::{CommandSource, CommandSourceError};
use crate::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use crate::ports::conversation_store::ConversationStore;
use async_trait::async_trait;
use relay_domain::{CommandTemplate, Conversation, Message, SessionOrigin, SessionSummary};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Minimal functioning store backed by a mutexed map.
#[derive(Default)]
pub struct InMemoryStore {
    sessions: Mutex<HashMap<String, Conversation>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn create(&self, messages: Vec<Message>) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert(id.clone(), messages).await;
        id
    }

    async fn insert(&self, session_id: String, messages: Vec<Message>) {
        let conversation = Conversation::new(session_id.clone(), messages);
        self.sessions.lock().await.insert(session_id, conversation);
    }

    async fn get(&self, session_id: &str) -> Option<Conversation> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    async fn append_turn(&self, session_id: &str, user: Message, assistant: Message) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(conversation) => {
                conversation.append_turn(user, assistant);
                true
            }
            None => false,
        }
    }

    async fn list(&self) -> Vec<SessionSummary> {
        self.sessions.lock().await.values().map(|c| c.summary()).collect()
    }

    async fn delete(&self, session_id: &str) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    async fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }
}

/// Scripted completion gateway recording the requests it sees.
pub struct MockGateway {
    reply: Result<String, String>,
    origin: SessionOrigin,
    provider_session: Option<String>,
    seen: std::sync::Mutex<Vec<CompletionRequest>>,
}

impl MockGateway {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            origin: SessionOrigin::Local,
            provider_session: None,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            origin: SessionOrigin::Local,
            provider_session: None,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_origin(mut self, origin: SessionOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_provider_session(mut self, id: &str) -> Self {
        self.provider_session = Some(id.to_string());
        self
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    fn origin(&self) -> SessionOrigin {
        self.origin
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        self.seen.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                provider_session_id: self.provider_session.clone(),
            }),
            Err(message) => Err(GatewayError::RequestFailed(message.clone())),
        }
    }
}

/// Command source backed by a fixed map.
#[derive(Default)]
pub struct StaticCommands {
    templates: HashMap<String, String>,
}

impl StaticCommands {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(name: &str, body: &str) -> Self {
        let mut templates = HashMap::new();
        templates.insert(name.to_string(), body.to_string());
        Self { templates }
    }
}

#[async_trait]
impl CommandSource for StaticCommands {
    async fn load(&self, name: &str) -> Result<CommandTemplate, CommandSourceError> {
        self.templates
            .get(name)
            .map(|body| CommandTemplate::new(name, body.clone()))
            .ok_or_else(|| CommandSourceError::NotFound(name.to_string()))
    }
}
