//! API error taxonomy and HTTP mapping.
//!
//! Workflow code returns `ApiError` directly; axum converts it into a JSON
//! error body with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// The primary error type for all request-handling code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing entity (post, registration, ...)
    #[error("{0} not found")]
    NotFound(String),

    /// Authentication missing or invalid
    #[error("authentication required")]
    Unauthorized,

    /// Authenticated but not allowed (wrong owner, non-admin)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Duplicate like, duplicate registration
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or malformed input fields
    #[error("validation failed: {0}")]
    Validation(String),

    /// External service failure (image store)
    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A specialized Result type for request handlers and actions.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage and internal failures are logged with detail but surfaced
        // to the client as an opaque message.
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error while handling request");
                "internal server error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            ApiError::NotFound("post".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("not the owner".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Conflict("already registered".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Validation("missing name".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream("image store".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
