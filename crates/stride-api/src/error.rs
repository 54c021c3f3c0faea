//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stride_core::error::{AppError, ErrorKind};

use crate::dto::response::ErrorResponse;

/// Handler error wrapping an [`AppError`].
///
/// Renders as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code for the wrapped error. Store and infrastructure
    /// failures all surface as 500.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::ExternalService
            | ErrorKind::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        }

        let body = ErrorResponse {
            error: self.0.message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failures_map_to_500() {
        for err in [
            AppError::external("boom"),
            AppError::service_unavailable("down"),
            AppError::database("gone"),
        ] {
            assert_eq!(
                ApiError::from(err).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
        assert_eq!(
            ApiError::from(AppError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_body_carries_message() {
        let response = ApiError::from(AppError::external("users unreachable")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "users unreachable"}));
    }
}
