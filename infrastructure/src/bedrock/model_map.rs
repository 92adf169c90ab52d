//! Bedrock model ID mapping
//!
//! Maps domain `Model` variants to Bedrock model identifiers, with
//! optional cross-region inference prefix.

use relay_domain::Model;

/// Convert a domain Model to a Bedrock model ID string.
///
/// Returns `None` for models the Bedrock backend cannot serve. `Custom`
/// identifiers pass through untouched so callers can name an inference
/// profile directly.
pub fn to_bedrock_model_id(model: &Model, cross_region: bool, region: &str) -> Option<String> {
    let base_id = match model {
        Model::ClaudeSonnet45 => "anthropic.claude-sonnet-4-5-20250929-v1:0",
        Model::ClaudeHaiku45 => "anthropic.claude-haiku-4-5-20250929-v1:0",
        Model::ClaudeOpus45 => "anthropic.claude-opus-4-5-20251101-v1:0",
        Model::ClaudeSonnet4 => "anthropic.claude-sonnet-4-20250514-v1:0",
        Model::Claude35Sonnet => "anthropic.claude-3-5-sonnet-20241022-v2:0",
        Model::Custom(id) => return Some(id.clone()),
    };

    if cross_region {
        let prefix = inference_profile_prefix(region);
        Some(format!("{prefix}.{base_id}"))
    } else {
        Some(base_id.to_string())
    }
}

/// Derive the inference profile region group from an AWS region string.
///
/// Cross-region inference profiles use continent-level prefixes:
/// `us-east-1` → `us`, `eu-west-1` → `eu`, `ap-northeast-1` → `ap`, etc.
fn inference_profile_prefix(region: &str) -> &str {
    match region.split('-').next() {
        Some(prefix @ ("us" | "eu" | "ap" | "me" | "sa" | "ca" | "af")) => prefix,
        _ => "us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sonnet4_on_demand() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet4, false, "us-east-1").unwrap();
        assert_eq!(id, "anthropic.claude-sonnet-4-20250514-v1:0");
    }

    #[test]
    fn test_cross_region_prefix() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet4, true, "us-east-1").unwrap();
        assert_eq!(id, "us.anthropic.claude-sonnet-4-20250514-v1:0");
    }

    #[test]
    fn test_cross_region_eu() {
        let id = to_bedrock_model_id(&Model::ClaudeHaiku45, true, "eu-west-1").unwrap();
        assert_eq!(id, "eu.anthropic.claude-haiku-4-5-20250929-v1:0");
    }

    #[test]
    fn test_unknown_region_falls_back_to_us() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet4, true, "xx-somewhere-1").unwrap();
        assert!(id.starts_with("us."));
    }

    #[test]
    fn test_custom_passes_through() {
        let model = Model::Custom("us.anthropic.claude-sonnet-4-20250514-v1:0".to_string());
        let id = to_bedrock_model_id(&model, true, "eu-west-1").unwrap();
        assert_eq!(id, "us.anthropic.claude-sonnet-4-20250514-v1:0");
    }
}
