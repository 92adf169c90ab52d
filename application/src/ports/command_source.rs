//! Command template source port

use async_trait::async_trait;
use relay_domain::CommandTemplate;
use thiserror::Error;

/// Errors from loading a named command template
#[derive(Error, Debug)]
pub enum CommandSourceError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Failed to read command template: {0}")]
    Io(#[from] std::io::Error),
}

/// Lookup of named instructional templates for the slash-command surface
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Load the template for `name`. A missing template is
    /// [`CommandSourceError::NotFound`], not an internal failure.
    async fn load(&self, name: &str) -> Result<CommandTemplate, CommandSourceError>;
}
