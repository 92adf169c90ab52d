//! Configuration loader with multi-source merging

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use relay_domain::{Model, PromptTemplate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which completion backend serves /api/chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// AWS Bedrock Converse API; sessions are relay-local.
    Bedrock,
    /// External agent driver CLI; sessions live with the driver.
    Driver,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bedrock" => Ok(Self::Bedrock),
            "driver" => Ok(Self::Driver),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8002,
        }
    }
}

/// Backend selection and prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Which completion backend to use
    pub kind: BackendKind,
    /// Model identifier passed to the backend
    pub model: String,
    /// System instruction for the chat flow
    pub system_prompt: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Bedrock,
            model: Model::default().as_str().to_string(),
            system_prompt: PromptTemplate::chat_system().to_string(),
        }
    }
}

impl BackendConfig {
    pub fn model(&self) -> Model {
        // FromStr is infallible; unknown names pass through as custom ids.
        self.model.parse().unwrap_or_default()
    }
}

/// AWS Bedrock backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockConfig {
    /// AWS region for the Bedrock runtime client
    pub region: String,
    /// Named AWS profile, if not using the default credential chain
    pub profile: Option<String>,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Route through cross-region inference profiles
    pub cross_region: bool,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            max_tokens: 4096,
            cross_region: true,
        }
    }
}

/// Agent-driver backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Driver executable name or path
    pub command: String,
    /// Cap on the driver's internal reasoning turns per exchange
    pub max_turns: u32,
    /// Seconds an aborted exchange may keep running before a hard kill
    pub abort_grace_secs: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            max_turns: 5,
            abort_grace_secs: 30,
        }
    }
}

/// Slash-command template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Directory of `<name>.md` command templates
    pub dir: PathBuf,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".claude/commands"),
        }
    }
}

/// Main relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Backend selection and prompt settings
    pub backend: BackendConfig,
    /// Bedrock backend settings
    pub bedrock: BedrockConfig,
    /// Agent-driver backend settings
    pub driver: DriverConfig,
    /// Slash-command settings
    pub commands: CommandsConfig,
}

/// Configuration loader that merges multiple sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `RELAY_*` environment variables (`RELAY_SERVER__PORT=9000`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./relay.toml` or `./.relay.toml`
    /// 4. Default values
    ///
    /// The bare `PORT`, `ANTHROPIC_MODEL`, and `AWS_REGION` variables are
    /// honored as conventional aliases after the merge.
    pub fn load(config_path: Option<&PathBuf>) -> Result<RelayConfig, figment::Error> {
        let mut figment = Figment::new().merge(Serialized::defaults(RelayConfig::default()));

        // Add project-level config files (check both names)
        for filename in &["relay.toml", ".relay.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("RELAY_").split("__"));

        let mut config: RelayConfig = figment.extract()?;
        Self::apply_conventional_env(&mut config);
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> RelayConfig {
        RelayConfig::default()
    }

    fn apply_conventional_env(config: &mut RelayConfig) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(model) = std::env::var("ANTHROPIC_MODEL") {
            if !model.trim().is_empty() {
                config.backend.model = model;
            }
        }
        if let Ok(region) = std::env::var("AWS_REGION") {
            if !region.trim().is_empty() {
                config.bedrock.region = region;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.port, 8002);
        assert_eq!(config.backend.kind, BackendKind::Bedrock);
        assert_eq!(config.bedrock.region, "us-east-1");
        assert_eq!(config.driver.command, "claude");
        assert_eq!(config.driver.max_turns, 5);
        assert!(!config.backend.system_prompt.is_empty());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[backend]\nkind = \"driver\"\nmodel = \"claude-sonnet-4.5\""
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.backend.kind, BackendKind::Driver);
        assert_eq!(config.backend.model(), Model::ClaudeSonnet45);
        // Unset sections keep their defaults.
        assert_eq!(config.bedrock.max_tokens, 4096);
    }

    #[test]
    fn backend_kind_parses_case_insensitively() {
        assert_eq!("Bedrock".parse::<BackendKind>().unwrap(), BackendKind::Bedrock);
        assert_eq!("DRIVER".parse::<BackendKind>().unwrap(), BackendKind::Driver);
        assert!("openai".parse::<BackendKind>().is_err());
    }
}
