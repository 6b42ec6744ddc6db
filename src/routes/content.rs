//! Handlers serving files from the content root.
//!
//! HTML responses are variant-rendered unless the deployment variant is the
//! passthrough value, in which case the original bytes go out unchanged.
//! Everything else is delegated to tower-http's file service so content
//! type and conditional-request handling behave like any static server.

use axum::{
    body::Body,
    extract::{Path, Request, State},
    response::{Html, IntoResponse, Response},
};
use tower::util::ServiceExt;
use tower_http::services::ServeFile;
use tracing::instrument;

use crate::config::PASSTHROUGH_VARIANT;
use crate::content::ServedFile;
use crate::error::AppError;
use crate::render::inject_variant_banner;
use crate::state::AppState;

/// Root page handler.
#[instrument(name = "content::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    serve(&state, "index.html").await
}

/// Wildcard handler for arbitrary files under the content root.
#[instrument(name = "content::serve_path", skip(state))]
pub async fn serve_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, &path).await
}

async fn serve(state: &AppState, requested: &str) -> Result<Response, AppError> {
    let file = state.content.resolve(requested)?;

    if file.is_html() && state.config.variant != PASSTHROUGH_VARIANT {
        let html = tokio::fs::read_to_string(&file.path).await?;
        let rendered = inject_variant_banner(&html, &state.config.variant);
        return Ok(Html(rendered).into_response());
    }

    send_file(&file).await
}

/// Serves the resolved file as-is via tower-http.
async fn send_file(file: &ServedFile) -> Result<Response, AppError> {
    let request = Request::builder()
        .body(Body::empty())
        .map_err(|err| AppError::Internal(err.to_string()))?;

    match ServeFile::new(&file.path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(infallible) => match infallible {},
    }
}
