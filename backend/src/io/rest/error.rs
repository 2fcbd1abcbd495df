use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use thiserror::Error;
use tracing::error;

use crate::domain::DomainError;

/// Error returned by the REST handlers
///
/// Renders as `{message, error?}` JSON. Server errors carry a generic
/// message plus the underlying error text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Body missing, not JSON, or not the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {error}")]
    Internal { message: String, error: String },
}

impl ApiError {
    /// Convert a domain error, using `context` as the message for server errors
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::BadRequest(message),
            DomainError::NotFound(message) => ApiError::NotFound(message),
            DomainError::Malformed(detail) => ApiError::Internal {
                message: context.to_string(),
                error: detail,
            },
            DomainError::Storage(e) => ApiError::Internal {
                message: context.to_string(),
                error: format!("{:#}", e),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => ErrorResponse {
                message,
                error: None,
            },
            ApiError::InvalidBody(detail) => ErrorResponse {
                message: "Invalid request body".to_string(),
                error: Some(detail),
            },
            ApiError::Internal { message, error } => {
                error!("{}: {}", message, error);
                ErrorResponse {
                    message,
                    error: Some(error),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Malformed("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                DomainError::Storage(anyhow::anyhow!("connection refused")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from_domain(err, "Error").status(), status);
        }
    }

    #[tokio::test]
    async fn test_internal_error_body_keeps_detail() {
        let response = ApiError::from_domain(
            DomainError::Storage(anyhow::anyhow!("connection refused")),
            "Error fetching dishes",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Error fetching dishes");
        assert_eq!(body.error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_invalid_body_renders_as_bad_request() {
        let response = ApiError::InvalidBody("expected value at line 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Invalid request body");
        assert_eq!(body.error.as_deref(), Some("expected value at line 1"));
    }
}
