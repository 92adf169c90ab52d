//! Bedrock completion gateway
//!
//! Implements `CompletionGateway` over the AWS Bedrock Converse API.
//! Handles AWS credential initialization and per-turn Converse calls.
//! The Converse API is stateless, so the full history travels with every
//! request and session identifiers stay locally minted.

use super::{model_map, types};
use crate::config::BedrockConfig;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::types as bedrock;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use relay_application::{Completion, CompletionGateway, CompletionRequest, GatewayError};
use relay_domain::{Model, SessionOrigin};
use std::sync::Arc;
use tracing::{debug, info};

pub struct BedrockGateway {
    client: Arc<BedrockClient>,
    bedrock_model_id: String,
    max_tokens: i32,
}

impl BedrockGateway {
    /// Create a new Bedrock gateway.
    ///
    /// Initializes AWS credentials and resolves the configured model to a
    /// Bedrock model identifier.
    pub async fn new(config: &BedrockConfig, model: &Model) -> Result<Self, GatewayError> {
        let bedrock_model_id =
            model_map::to_bedrock_model_id(model, config.cross_region, &config.region).ok_or_else(
                || {
                    GatewayError::ModelNotAvailable(format!(
                        "Model {} is not supported by Bedrock",
                        model
                    ))
                },
            )?;

        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let aws_config = aws_config_loader.load().await;
        let client = BedrockClient::new(&aws_config);

        info!(
            region = %config.region,
            model = %bedrock_model_id,
            "Bedrock gateway initialized"
        );

        Ok(Self {
            client: Arc::new(client),
            bedrock_model_id,
            max_tokens: config.max_tokens as i32,
        })
    }

    fn system_blocks(&self, system_prompt: &str) -> Vec<bedrock::SystemContentBlock> {
        if system_prompt.is_empty() {
            vec![]
        } else {
            vec![bedrock::SystemContentBlock::Text(system_prompt.to_string())]
        }
    }
}

#[async_trait]
impl CompletionGateway for BedrockGateway {
    fn origin(&self) -> SessionOrigin {
        SessionOrigin::Local
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        let messages = types::convert_history(&request.messages)?;

        debug!(
            model = %self.bedrock_model_id,
            messages = messages.len(),
            "Calling Bedrock Converse API"
        );

        let response = self
            .client
            .converse()
            .model_id(&self.bedrock_model_id)
            .set_system(Some(self.system_blocks(&request.system_prompt)))
            .set_messages(Some(messages))
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let output = response.output().ok_or_else(|| {
            GatewayError::RequestFailed("No output in Bedrock response".to_string())
        })?;

        Ok(Completion::from_text(types::extract_text(output)))
    }
}
