//! Application state shared across all handlers.

use relay_application::{ChatUseCase, ConversationStore, RunCommandUseCase};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatUseCase>,
    pub commands: Arc<RunCommandUseCase>,
    pub store: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(
        chat: Arc<ChatUseCase>,
        commands: Arc<RunCommandUseCase>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            chat,
            commands,
            store,
        }
    }
}
