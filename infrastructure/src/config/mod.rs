//! Configuration with multi-source merging

pub mod loader;

pub use loader::{
    BackendConfig, BackendKind, BedrockConfig, CommandsConfig, ConfigLoader, DriverConfig,
    RelayConfig, ServerConfig,
};
