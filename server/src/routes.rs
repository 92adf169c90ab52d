//! Route handlers and request/response DTOs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use relay_application::{ChatInput, CommandInput};
use relay_domain::{DomainError, Message};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/command", post(run_command))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub resume_session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub request_id: String,
    pub session_id: String,
    pub query: String,
    pub response: String,
    pub is_continuation: bool,
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let outcome = state
        .chat
        .execute(ChatInput {
            query: req.query,
            request_id: req.request_id,
            resume_session: req.resume_session,
        })
        .await?;

    Ok(Json(ChatResponse {
        request_id: outcome.request_id,
        session_id: outcome.session_id,
        query: outcome.query,
        response: outcome.response,
        is_continuation: outcome.is_continuation,
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionListEntry {
    pub session_id: String,
    pub last_query: String,
    pub timestamp: DateTime<Utc>,
}

async fn list_sessions(State(state): State<AppState>) -> Json<Value> {
    let sessions: Vec<SessionListEntry> = state
        .store
        .list()
        .await
        .into_iter()
        .map(|s| SessionListEntry {
            session_id: s.session_id,
            last_query: s.last_query,
            timestamp: s.timestamp,
        })
        .collect();

    Json(json!({ "count": sessions.len(), "sessions": sessions }))
}

#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub last_query: String,
    pub last_response: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetail>, ApiError> {
    let conversation = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| DomainError::SessionNotFound(id))?;

    Ok(Json(SessionDetail {
        session_id: conversation.session_id,
        messages: conversation.messages,
        last_query: conversation.last_query,
        last_response: conversation.last_response,
        created_at: conversation.created_at,
        updated_at: conversation.updated_at,
    }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete(&id).await {
        Ok(Json(json!({
            "message": "Session deleted",
            "session_id": id,
        })))
    } else {
        Err(DomainError::SessionNotFound(id).into())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub command: String,
    pub result: String,
    pub resume_session: String,
}

async fn run_command(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let outcome = state
        .commands
        .execute(CommandInput {
            command: req.command,
            arguments: req.arguments,
        })
        .await?;

    Ok(Json(CommandResponse {
        command: outcome.command,
        result: outcome.result,
        resume_session: outcome.resume_session,
    }))
}
