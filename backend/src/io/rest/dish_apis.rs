//! # REST API for the Dish Catalogue
//!
//! Mounted at `/record`. Dish ids in paths are hex object ids.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use shared::{DishRequest, UpdateLastEatenRequest};
use tracing::info;

use crate::domain::commands::dish::SearchDishesQuery;
use crate::io::rest::error::ApiError;
use crate::io::rest::extract::ApiJson;
use crate::io::rest::mappers::dish_mapper::DishMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// Create a router for dish related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dishes).post(create_dish))
        .route("/search", get(search_dishes))
        .route("/:id", get(get_dish).patch(update_dish).delete(delete_dish))
        .route("/:id/last-eaten", patch(update_last_eaten))
}

/// List every dish
async fn list_dishes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /record");

    match state.dish_service.list_dishes().await {
        Ok(dishes) => (StatusCode::OK, Json(DishMapper::to_dto_list(dishes))).into_response(),
        Err(e) => ApiError::from_domain(e, "Error fetching dishes").into_response(),
    }
}

/// Search dishes by name
async fn search_dishes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /record/search - query: {:?}", query);

    let query = SearchDishesQuery { name: query.name };
    match state.dish_service.search_dishes(query).await {
        Ok(dishes) => (StatusCode::OK, Json(DishMapper::to_dto_list(dishes))).into_response(),
        Err(e) => ApiError::from_domain(e, "Error searching dishes").into_response(),
    }
}

/// Get a single dish
async fn get_dish(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /record/{}", id);

    match state.dish_service.get_dish(&id).await {
        Ok(dish) => (StatusCode::OK, Json(DishMapper::to_dto(dish))).into_response(),
        Err(e) => ApiError::from_domain(e, "Error fetching dish").into_response(),
    }
}

/// Create a dish
async fn create_dish(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DishRequest>,
) -> impl IntoResponse {
    info!("POST /record - request: {:?}", request);

    let command = DishMapper::to_create_command(request);
    match state.dish_service.create_dish(command).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(DishMapper::to_insert_response(result))).into_response()
        }
        Err(e) => ApiError::from_domain(e, "Error adding dish").into_response(),
    }
}

/// Overwrite the editable fields of a dish
async fn update_dish(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<DishRequest>,
) -> impl IntoResponse {
    info!("PATCH /record/{} - request: {:?}", id, request);

    let command = DishMapper::to_update_command(id, request);
    match state.dish_service.update_dish(command).await {
        Ok(result) => (StatusCode::OK, Json(DishMapper::to_update_response(result))).into_response(),
        Err(e) => ApiError::from_domain(e, "Error updating dish").into_response(),
    }
}

/// Record when a dish was last eaten
async fn update_last_eaten(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateLastEatenRequest>,
) -> impl IntoResponse {
    info!("PATCH /record/{}/last-eaten - request: {:?}", id, request);

    let command = DishMapper::to_last_eaten_command(id, request);
    match state.dish_service.update_last_eaten(command).await {
        Ok(result) => {
            (StatusCode::OK, Json(DishMapper::to_last_eaten_response(result))).into_response()
        }
        Err(e) => ApiError::from_domain(e, "Error updating last eaten date").into_response(),
    }
}

/// Delete a dish
async fn delete_dish(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /record/{}", id);

    match state.dish_service.delete_dish(&id).await {
        Ok(result) => (StatusCode::OK, Json(DishMapper::to_delete_response(result))).into_response(),
        Err(e) => ApiError::from_domain(e, "Error deleting dish").into_response(),
    }
}
