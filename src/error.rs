use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(_) => error_page(StatusCode::NOT_FOUND, &self.to_string()),
            AppError::InvalidParameter(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            _ => {
                tracing::error!("Internal error: {:?}", self);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
</head>
<body>
    <div class="error-page">
        <h1>Error {}</h1>
        <p>{}</p>
        <a href="/">Return to homepage</a>
    </div>
</body>
</html>"#,
        status.as_u16(),
        status.as_u16(),
        message
    );

    (status, Html(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("missing.html".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_parameter_maps_to_400() {
        let response =
            AppError::InvalidParameter("Invalid limit parameter".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_errors_map_to_500() {
        let response =
            AppError::Io(io::Error::new(io::ErrorKind::Other, "disk on fire")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
