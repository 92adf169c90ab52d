//! Infrastructure layer for chat-relay
//!
//! Adapters for the application-layer ports: the in-memory conversation
//! store, the AWS Bedrock completion backend, the agent-driver completion
//! backend, the filesystem command source, and the configuration loader.

pub mod bedrock;
pub mod commands;
pub mod config;
pub mod driver;
pub mod store;

pub use bedrock::BedrockGateway;
pub use commands::FileCommandSource;
pub use config::{BackendKind, ConfigLoader, RelayConfig};
pub use driver::AgentDriverGateway;
pub use store::MemoryConversationStore;
