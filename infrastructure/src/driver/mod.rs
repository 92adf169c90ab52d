//! Agent-driver completion backend
//!
//! Spawns an external driver CLI per exchange and consumes its stream of
//! typed JSON events. The driver owns the conversation state: it issues
//! the session identifier the relay persists, and resuming a session
//! means handing that identifier back to the driver.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod transport;

pub use error::{DriverError, Result};
pub use gateway::AgentDriverGateway;
