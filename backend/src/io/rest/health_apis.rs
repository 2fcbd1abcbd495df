//! # Health Endpoints
//!
//! `/health` answers as long as the process is up. `/health/ready` also
//! pings the database.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{HealthResponse, ReadinessResponse};
use tracing::debug;

use crate::domain::Readiness;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/ready", get(readiness))
}

async fn liveness(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /health");

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.health_service.version().to_string(),
    })
}

async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /health/ready");

    match state.health_service.readiness().await {
        Readiness::Ready => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready".to_string(),
                database: "up".to_string(),
                error: None,
            }),
        ),
        Readiness::Unavailable { error } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "unavailable".to_string(),
                database: "down".to_string(),
                error: Some(error),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalendarService;
    use crate::storage::traits::{Connection, DishStorage, MealPlanStorage};
    use crate::storage::memory::InMemoryConnection;
    use crate::io::rest::test_support::{send, test_app};
    use crate::{create_router, initialize_backend};
    use async_trait::async_trait;
    use axum::http::Method;
    use serde_json::json;
    use std::sync::Arc;

    /// Connection whose database never answers
    struct DownConnection(InMemoryConnection);

    #[async_trait]
    impl Connection for DownConnection {
        fn dish_storage(&self) -> Arc<dyn DishStorage> {
            self.0.dish_storage()
        }

        fn meal_plan_storage(&self) -> Arc<dyn MealPlanStorage> {
            self.0.meal_plan_storage()
        }

        async fn ping(&self) -> anyhow::Result<()> {
            anyhow::bail!("server selection timeout")
        }
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = send(&test_app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_readiness_up() {
        let (status, body) = send(&test_app(), Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ready", "database": "up" }));
    }

    #[tokio::test]
    async fn test_readiness_down() {
        let state = initialize_backend(
            Arc::new(DownConnection(InMemoryConnection::new())),
            CalendarService::new(),
            None,
        );
        let app = create_router(state, Vec::new());

        let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], json!("unavailable"));
        assert_eq!(body["database"], json!("down"));
        assert_eq!(body["error"], json!("server selection timeout"));
    }
}
