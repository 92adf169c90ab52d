//! Domain layer for chat-relay
//!
//! This crate contains the conversation entities and value objects shared
//! by both completion backends. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A server-held multi-turn message history keyed by an opaque session
//! identifier. One *turn* is a user message plus the resulting assistant
//! message, appended together after the upstream call completes.
//!
//! ## Session origin
//!
//! The session identifier is minted locally for the Bedrock backend and
//! issued by the external driver for the agent backend. [`SessionOrigin`]
//! makes that provenance explicit so both backends share one store.

pub mod conversation;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use conversation::entities::{Conversation, Message, Role, SessionSummary};
pub use conversation::origin::SessionOrigin;
pub use core::{error::DomainError, model::Model};
pub use prompt::{CommandTemplate, PromptTemplate};
