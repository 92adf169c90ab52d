//! Error types for the agent-driver adapter

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that can occur when communicating with the driver CLI
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to spawn driver process: {0}")]
    SpawnError(#[from] std::io::Error),

    #[error("Failed to parse event: {error}\nRaw event: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Driver reported failure: {0}")]
    DriverFailed(String),

    #[error("Driver exited without a result (status {status})")]
    EarlyExit { status: String },

    #[error("Exchange aborted")]
    Aborted,
}
