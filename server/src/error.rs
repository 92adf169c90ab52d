//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_application::{ChatError, CommandError};
use relay_domain::DomainError;
use serde_json::json;

/// API error with status code, message, and optional detail.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: msg.into(),
            details: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: msg.into(),
            details: None,
        }
    }

    pub fn internal(msg: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: msg.into(),
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            ApiError::not_found(err.to_string())
        } else {
            ApiError::bad_request(err.to_string())
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyQuery => DomainError::EmptyQuery.into(),
            ChatError::Gateway(e) => ApiError::internal("Chat request failed", e.to_string()),
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::NotFound(name) => DomainError::CommandNotFound(name).into(),
            CommandError::Source(e) => {
                ApiError::internal("Failed to load command", e.to_string())
            }
            CommandError::Gateway(e) => {
                ApiError::internal("Command request failed", e.to_string())
            }
        }
    }
}
