//! Health toggle endpoints for container orchestration experiments.
//!
//! `GET /health` reports the current state for liveness/readiness probes.
//! The two POST endpoints flip the state by hand, which lets an operator
//! watch Kubernetes react to a failing probe without touching the process.
//! Every transition is logged as an audit trail.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::config::DEFAULT_FAIL_REASON;
use crate::health::HealthStatus;
use crate::state::AppState;

/// Optional reason carried by `POST /health/fail`, as query or form field.
#[derive(Debug, Deserialize)]
pub struct FailParams {
    reason: Option<String>,
}

/// Health check handler.
///
/// Returns 200 "ok" while healthy and 503 with the recorded reason after a
/// forced failure.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.health.status() {
        HealthStatus::Healthy => (StatusCode::OK, "ok").into_response(),
        HealthStatus::Unhealthy { reason } => {
            tracing::warn!(%reason, "Health check returning 503 due to forced failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("unhealthy: {reason}"),
            )
                .into_response()
        }
    }
}

/// Forces the health endpoint into the unhealthy state.
///
/// The reason is taken from the query string first, then from a form body;
/// absent or empty values fall back to a fixed default. Always returns 200
/// acknowledging the new state.
pub async fn fail(
    State(state): State<AppState>,
    Query(query): Query<FailParams>,
    body: String,
) -> String {
    let form: Option<FailParams> = serde_urlencoded::from_str(&body).ok();
    let reason = query
        .reason
        .filter(|reason| !reason.is_empty())
        .or_else(|| {
            form.and_then(|params| params.reason)
                .filter(|reason| !reason.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_FAIL_REASON.to_string());

    state.health.fail(&reason);
    tracing::warn!(%reason, "Health failure set");
    format!("health failure set: {reason}")
}

/// Clears a forced failure so `GET /health` returns 200 again.
///
/// A no-op when already healthy; always returns 200.
pub async fn ok(State(state): State<AppState>) -> &'static str {
    state.health.restore();
    tracing::info!("Health restored");
    "health restored"
}
