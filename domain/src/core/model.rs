//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// This is a domain concept naming the models a relay instance can be
/// configured to forward to. Unknown identifiers parse as `Custom` so a
/// provider-specific model id can be passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    ClaudeSonnet45,
    ClaudeHaiku45,
    ClaudeOpus45,
    ClaudeSonnet4,
    Claude35Sonnet,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet45 => "claude-sonnet-4.5",
            Model::ClaudeHaiku45 => "claude-haiku-4.5",
            Model::ClaudeOpus45 => "claude-opus-4.5",
            Model::ClaudeSonnet4 => "claude-sonnet-4",
            Model::Claude35Sonnet => "claude-3.5-sonnet",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (Claude Sonnet 4)
    fn default() -> Self {
        Model::ClaudeSonnet4
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "claude-haiku-4.5" => Model::ClaudeHaiku45,
            "claude-opus-4.5" => Model::ClaudeOpus45,
            "claude-sonnet-4" => Model::ClaudeSonnet4,
            "claude-3.5-sonnet" => Model::Claude35Sonnet,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("Model::from_str is infallible"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let models = vec![
            Model::ClaudeSonnet45,
            Model::ClaudeHaiku45,
            Model::ClaudeSonnet4,
        ];
        for model in models {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "us.anthropic.claude-sonnet-4-20250514-v1:0".parse().unwrap();
        assert_eq!(
            model,
            Model::Custom("us.anthropic.claude-sonnet-4-20250514-v1:0".to_string())
        );
        assert_eq!(model.to_string(), "us.anthropic.claude-sonnet-4-20250514-v1:0");
    }

    #[test]
    fn test_model_default() {
        let model = Model::default();
        assert_eq!(model, Model::ClaudeSonnet4);
    }
}
