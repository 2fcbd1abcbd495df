//! # Domain Module
//!
//! Contains the business logic of the meal planner.
//!
//! ## Module Organization
//!
//! - **dish_service**: dish catalogue CRUD, name search and the last-eaten rule
//! - **meal_plan_service**: weekly lunch/dinner plans and week initialisation
//! - **health_service**: liveness and database readiness
//! - **access_gate_service**: server-side check of the shared app password
//! - **calendar**: "today", end of day and Monday week starts, behind an injectable clock
//! - **last_eaten**: the pure last-eaten decision and date parsing
//!
//! ## Business Rules
//!
//! - A dish's last-eaten date never moves backwards and never past the end of today
//! - Dish names are trimmed and must not be empty
//! - Ingredient and preference tags behave as sets
//! - A week is keyed by its Monday (`yyyy-MM-dd`) and exists at most once
//!
//! Services only see storage through the traits in
//! [`crate::storage::traits`], so they run unchanged against MongoDB or the
//! in-memory backend.

pub mod access_gate_service;
pub mod calendar;
pub mod commands;
pub mod dish_service;
pub mod errors;
pub mod health_service;
pub mod last_eaten;
pub mod meal_plan_service;
pub mod models;

pub use access_gate_service::AccessGateService;
pub use calendar::CalendarService;
pub use dish_service::DishService;
pub use errors::{DomainError, DomainResult};
pub use health_service::{HealthService, Readiness};
pub use meal_plan_service::MealPlanService;
