//! Application layer for chat-relay
//!
//! Use cases and ports. The ports define how the application talks to the
//! outside world (conversation storage, completion backends, command
//! templates); adapters live in the infrastructure layer.

pub mod ports;
pub mod resolver;
pub mod use_cases;

pub use ports::command_source::{CommandSource, CommandSourceError};
pub use ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
pub use ports::conversation_store::ConversationStore;
pub use resolver::{ResolvedConversation, SessionResolver};
pub use use_cases::chat::{ChatError, ChatInput, ChatOutcome, ChatUseCase};
pub use use_cases::command::{CommandError, CommandInput, CommandOutcome, RunCommandUseCase};
