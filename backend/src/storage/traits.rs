//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::MealSlots;
use std::sync::Arc;

use crate::domain::models::dish::{Dish, DishFields};
use crate::domain::models::meal_plan::{MealPlan, UpsertOutcome};
use crate::domain::models::UpdateOutcome;

/// Trait defining the interface for dish storage operations (`meals` collection)
///
/// Dish ids are the hex form of a database object id. Implementations
/// reject ids that are not valid object ids with an error rather than
/// treating them as unknown.
#[async_trait]
pub trait DishStorage: Send + Sync {
    /// List every dish in storage order
    async fn list_dishes(&self) -> Result<Vec<Dish>>;

    /// Dishes whose name contains `term`, ignoring case
    async fn search_dishes(&self, term: &str) -> Result<Vec<Dish>>;

    /// Retrieve a specific dish by ID
    async fn get_dish(&self, dish_id: &str) -> Result<Option<Dish>>;

    /// Store a new dish and return its generated ID
    async fn insert_dish(&self, fields: &DishFields) -> Result<String>;

    /// Overwrite the editable fields of a dish
    async fn update_dish(&self, dish_id: &str, fields: &DishFields) -> Result<UpdateOutcome>;

    /// Set the last-eaten date unconditionally
    async fn set_last_eaten(&self, dish_id: &str, date: DateTime<Utc>) -> Result<UpdateOutcome>;

    /// Delete a dish, returning the number of documents removed
    async fn delete_dish(&self, dish_id: &str) -> Result<u64>;
}

/// Trait defining the interface for weekly meal plan storage (`archive` collection)
#[async_trait]
pub trait MealPlanStorage: Send + Sync {
    /// Retrieve the plan for a week by its start date
    async fn get_meal_plan(&self, week_start: &str) -> Result<Option<MealPlan>>;

    /// Replace lunch and dinner for a week, creating the week if needed
    ///
    /// `created_at` is only written when the week is inserted.
    async fn upsert_meal_plan(
        &self,
        week_start: &str,
        lunch: &MealSlots,
        dinner: &MealSlots,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome>;

    /// Insert an empty week unless one already exists
    ///
    /// Returns true if this call created the week. Must be atomic with
    /// respect to concurrent callers for the same week.
    async fn create_meal_plan_if_absent(&self, week_start: &str, now: DateTime<Utc>) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// A connection is created once at startup and hands out repositories for
/// each collection. The domain layer only ever sees these trait objects.
#[async_trait]
pub trait Connection: Send + Sync {
    fn dish_storage(&self) -> Arc<dyn DishStorage>;

    fn meal_plan_storage(&self) -> Arc<dyn MealPlanStorage>;

    /// Round-trip to the backing store, used for readiness checks
    async fn ping(&self) -> Result<()>;
}
