//! # REST API for the Weekly Calendar
//!
//! Mounted at `/api/calendar`. Weeks are addressed by their Monday in
//! `yyyy-MM-dd` form.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::SaveMealPlanRequest;
use tracing::info;

use crate::domain::DomainError;
use crate::io::rest::error::ApiError;
use crate::io::rest::extract::ApiJson;
use crate::io::rest::mappers::meal_plan_mapper::MealPlanMapper;
use crate::AppState;

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(save_meal_plan))
        .route("/initialise-weeks", post(initialise_weeks))
        .route("/:week_start", get(get_meal_plan))
}

/// Get lunch and dinner for a week
async fn get_meal_plan(
    State(state): State<AppState>,
    Path(week_start): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/calendar/{}", week_start);

    match state.meal_plan_service.get_meal_plan(&week_start).await {
        Ok(plan) => (StatusCode::OK, Json(MealPlanMapper::to_response(plan))).into_response(),
        // The client renders an empty week from this body
        Err(DomainError::NotFound(message)) => (
            StatusCode::NOT_FOUND,
            Json(MealPlanMapper::to_not_found_response(message)),
        )
            .into_response(),
        Err(e) => ApiError::from_domain(e, "Server error").into_response(),
    }
}

/// Save a week, creating it if needed
async fn save_meal_plan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SaveMealPlanRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar - request: {:?}", request);

    let command = MealPlanMapper::to_save_command(request);
    match state.meal_plan_service.save_meal_plan(command).await {
        Ok(result) => (StatusCode::OK, Json(MealPlanMapper::to_save_response(result))).into_response(),
        Err(e) => ApiError::from_domain(e, "Server error").into_response(),
    }
}

/// Create the current and next two weeks if they do not exist yet
async fn initialise_weeks(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/initialise-weeks");

    match state.meal_plan_service.initialise_weeks().await {
        Ok(result) => {
            (StatusCode::OK, Json(MealPlanMapper::to_initialise_response(result))).into_response()
        }
        Err(e) => ApiError::from_domain(e, "Server error").into_response(),
    }
}
