//! In-process storage backend.
//!
//! Implements the same traits as the MongoDB backend on top of plain
//! collections behind locks. Used by the test suites.

pub mod dish_repository;
pub mod meal_plan_repository;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use dish_repository::DishRepository;
pub use meal_plan_repository::MealPlanRepository;

use crate::storage::traits::{Connection, DishStorage, MealPlanStorage};

#[derive(Clone, Default)]
pub struct InMemoryConnection {
    dishes: Arc<DishRepository>,
    meal_plans: Arc<MealPlanRepository>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Connection for InMemoryConnection {
    fn dish_storage(&self) -> Arc<dyn DishStorage> {
        self.dishes.clone()
    }

    fn meal_plan_storage(&self) -> Arc<dyn MealPlanStorage> {
        self.meal_plans.clone()
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
