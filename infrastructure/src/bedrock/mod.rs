//! AWS Bedrock completion backend
//!
//! Stateless request/response variant: each turn sends the full message
//! history to the Converse API and the relay mints session identifiers
//! locally.

pub mod gateway;
pub mod model_map;
pub mod types;

pub use gateway::BedrockGateway;
