//! # REST API for the Access Gate
//!
//! Mounted at `/api/auth`. Only reports whether a password matches the
//! configured one; no session or token is issued.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use shared::{VerifyAccessRequest, VerifyAccessResponse};
use tracing::info;

use crate::domain::commands::access::VerifyAccessCommand;
use crate::io::rest::error::ApiError;
use crate::io::rest::extract::ApiJson;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/verify", post(verify_access))
}

/// Check a password against the configured one
async fn verify_access(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyAccessRequest>,
) -> impl IntoResponse {
    // The password itself is never logged
    info!("POST /api/auth/verify");

    let command = VerifyAccessCommand {
        password: request.password,
    };
    match state.access_gate_service.verify(command) {
        Ok(result) => (
            StatusCode::OK,
            Json(VerifyAccessResponse {
                success: result.success,
                message: result.message,
            }),
        )
            .into_response(),
        Err(e) => ApiError::from_domain(e, "Error verifying password").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{send, test_app, test_app_with_password};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_verify_password() {
        let app = test_app_with_password(Some("letmein"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/verify",
            Some(json!({ "password": "letmein" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/verify",
            Some(json!({ "password": "guess" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(false));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/verify",
            Some(json!({ "password": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_without_configured_password() {
        let (status, body) = send(
            &test_app(),
            Method::POST,
            "/api/auth/verify",
            Some(json!({ "password": "letmein" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Access gate is not configured"));
    }
}
