//! HTTP API module for the vitals bridge
//!
//! # Endpoints
//! - `POST /api/push` — ingest a telemetry reading
//! - `GET /api/get` — latest stored readings
//! - `GET /health` — health check

pub mod gate;
pub mod handlers;

use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;

use crate::config::Config;
use crate::store::KvStore;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
}

/// Creates the main Axum router with all endpoints
///
/// The telemetry routes are registered for any method: the gate inside each
/// handler answers preflights and wrong verbs itself, so those responses
/// still carry the CORS headers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/push", any(handlers::ingest))
        .route("/api/get", any(handlers::query))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
