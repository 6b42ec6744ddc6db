//! HTTP route handlers for the demo web app.
//!
//! Routes fall into three groups: content serving (root page plus a
//! wildcard over the content root), the health toggle, and the CPU-load
//! demo. The wildcard is registered last so the literal paths win.
//!
//! Per-request logging is an opt-in middleware layer that generates a
//! unique request ID for correlating all logs within a request.

pub mod content;
pub mod health;
pub mod heavy;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::middleware::request_log_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let request_logging = state.config.request_logging.enabled();

    let router = Router::new()
        .route("/", get(content::index))
        .route("/health", get(health::health))
        .route("/health/fail", post(health::fail))
        .route("/health/ok", post(health::ok))
        .route("/heavy", get(heavy::heavy))
        .route("/{*path}", get(content::serve_path))
        .with_state(state);

    if request_logging {
        router.layer(middleware::from_fn(request_log_layer))
    } else {
        router
    }
}
