//! Slash-command use case
//!
//! Loads a named instructional template, substitutes the caller's
//! arguments, and runs one completion with the rendered text as the
//! system instruction. A command always starts a fresh session; the
//! returned `resume_session` lets the caller continue from the result.

use crate::ports::command_source::{CommandSource, CommandSourceError};
use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::conversation_store::ConversationStore;
use relay_domain::{Message, PromptTemplate};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the command use case
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Failed to load command: {0}")]
    Source(std::io::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<CommandSourceError> for CommandError {
    fn from(err: CommandSourceError) -> Self {
        match err {
            CommandSourceError::NotFound(name) => CommandError::NotFound(name),
            CommandSourceError::Io(e) => CommandError::Source(e),
        }
    }
}

/// One inbound command request.
#[derive(Debug, Clone)]
pub struct CommandInput {
    pub command: String,
    pub arguments: String,
}

/// Shaped response for one command run.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub command: String,
    pub result: String,
    /// Session identifier of the freshly stored conversation, usable as
    /// `resume_session` on subsequent chat requests.
    pub resume_session: String,
}

/// Executes a named command template as one completion call
pub struct RunCommandUseCase {
    store: Arc<dyn ConversationStore>,
    gateway: Arc<dyn CompletionGateway>,
    commands: Arc<dyn CommandSource>,
}

impl RunCommandUseCase {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        gateway: Arc<dyn CompletionGateway>,
        commands: Arc<dyn CommandSource>,
    ) -> Self {
        Self {
            store,
            gateway,
            commands,
        }
    }

    pub async fn execute(&self, input: CommandInput) -> Result<CommandOutcome, CommandError> {
        let command = input.command.trim();
        let arguments = input.arguments.trim();

        let template = self.commands.load(command).await?;
        let system_prompt = template.render(arguments);

        info!(command = %command, "Running command template");

        let kickoff = PromptTemplate::command_kickoff(command, arguments);
        let request =
            CompletionRequest::new(system_prompt, vec![Message::user(kickoff)]);

        let completion = self.gateway.complete(request).await?;

        // Record the invocation itself, not the kickoff prompt, so the
        // session listing shows "/review src" rather than boilerplate.
        let history_entry = PromptTemplate::command_history_entry(command, arguments);
        let messages = vec![
            Message::user(history_entry),
            Message::assistant(completion.text.clone()),
        ];

        let resume_session = match completion.provider_session_id {
            Some(id) => {
                self.store.insert(id.clone(), messages).await;
                id
            }
            None => self.store.create(messages).await,
        };

        info!(command = %command, session_id = %resume_session, "Command completed");

        Ok(CommandOutcome {
            command: command.to_string(),
            result: completion.text,
            resume_session,
        })
    }
}
