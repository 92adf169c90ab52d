//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Converts domain messages to Converse API messages and extracts the
//! text content from Converse responses.

use aws_sdk_bedrockruntime::types as bedrock;
use relay_application::GatewayError;
use relay_domain::{Message, Role};

/// Convert a domain message to a Bedrock Converse message.
///
/// Returns `None` for `System` messages: the system instruction travels
/// in the request's dedicated system field, never in the history.
pub fn convert_message(message: &Message) -> Option<Result<bedrock::Message, GatewayError>> {
    let role = match message.role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
        Role::System => return None,
    };

    let built = bedrock::Message::builder()
        .role(role)
        .content(bedrock::ContentBlock::Text(message.content.clone()))
        .build()
        .map_err(|e| GatewayError::RequestFailed(format!("Failed to build message: {}", e)));

    Some(built)
}

/// Convert a full domain history to Converse messages.
pub fn convert_history(messages: &[Message]) -> Result<Vec<bedrock::Message>, GatewayError> {
    messages.iter().filter_map(convert_message).collect()
}

/// Concatenate all text blocks of a Converse output, in order, with no
/// separator. Non-text blocks (tool use, images, ...) are skipped.
pub fn extract_text(output: &bedrock::ConverseOutput) -> String {
    match output {
        bedrock::ConverseOutput::Message(message) => message
            .content()
            .iter()
            .filter_map(|block| match block {
                bedrock::ContentBlock::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect(),
        _ => String::new(),
    }
}

/// Convert a Bedrock SDK error to a GatewayError.
pub fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<
        aws_sdk_bedrockruntime::operation::converse::ConverseError,
    >,
) -> GatewayError {
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;

    match err {
        aws_sdk_bedrockruntime::error::SdkError::ServiceError(service_err) => {
            match service_err.err() {
                ConverseError::ThrottlingException(e) => {
                    GatewayError::RequestFailed(format!("Bedrock throttled: {}", e))
                }
                ConverseError::ModelNotReadyException(e) => {
                    GatewayError::ModelNotAvailable(format!("Bedrock model not ready: {}", e))
                }
                ConverseError::ValidationException(e) => {
                    GatewayError::RequestFailed(format!("Bedrock validation error: {}", e))
                }
                ConverseError::ModelTimeoutException(_) => GatewayError::Timeout,
                other => GatewayError::RequestFailed(format!("Bedrock error: {:?}", other)),
            }
        }
        other => GatewayError::ConnectionError(format!("Bedrock SDK error: {}", other)),
    }
}
