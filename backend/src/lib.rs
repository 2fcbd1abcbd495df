//! # Meal Planner Backend
//!
//! REST API behind the meal planner: a catalogue of dishes and a weekly
//! lunch/dinner calendar, persisted in MongoDB.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (axum handlers, DTO mapping, error translation)
//!     ↓
//! Domain Layer (services, last-eaten rule, calendar)
//!     ↓
//! Storage Layer (MongoDB, or in-memory for tests)
//! ```
//!
//! `main` builds one [`storage::MongoConnection`], hands it to
//! [`initialize_backend`] and serves the router from [`create_router`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::{AccessGateService, CalendarService, DishService, HealthService, MealPlanService};
use crate::io::rest::{auth_apis, calendar_apis, dish_apis, health_apis};
use crate::storage::Connection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub dish_service: DishService,
    pub meal_plan_service: MealPlanService,
    pub health_service: HealthService,
    pub access_gate_service: AccessGateService,
}

/// Wire the domain services onto a storage connection
pub fn initialize_backend(
    connection: Arc<dyn Connection>,
    calendar: CalendarService,
    app_password: Option<String>,
) -> AppState {
    info!("Setting up domain model");
    let dish_service = DishService::new(connection.dish_storage(), calendar.clone());
    let meal_plan_service = MealPlanService::new(connection.meal_plan_storage(), calendar);
    let health_service = HealthService::new(connection);
    let access_gate_service = AccessGateService::new(app_password);

    if access_gate_service.is_enabled() {
        info!("Access gate enabled");
    }

    AppState {
        dish_service,
        meal_plan_service,
        health_service,
        access_gate_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .nest("/record", dish_apis::router())
        .nest("/api/calendar", calendar_apis::router())
        .nest("/api/auth", auth_apis::router())
        .nest("/health", health_apis::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
