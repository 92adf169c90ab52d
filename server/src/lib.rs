//! Chat relay HTTP API server (Axum).
//!
//! REST endpoints for the chat flow, session CRUD, slash commands, and
//! health checks. The use cases and stores arrive pre-wired in
//! [`AppState`]; the binary in `main.rs` does the dependency injection.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::chat_routes())
        .merge(routes::session_routes())
        .with_state(state)
}
