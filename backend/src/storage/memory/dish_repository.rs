use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use std::sync::RwLock;

use crate::domain::models::dish::{Dish, DishFields};
use crate::domain::models::UpdateOutcome;
use crate::storage::parse_object_id;
use crate::storage::traits::DishStorage;

/// In-memory dish repository, insertion ordered
#[derive(Default)]
pub struct DishRepository {
    dishes: RwLock<Vec<Dish>>,
}

impl DishRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("in-memory dish store lock poisoned")
}

#[async_trait]
impl DishStorage for DishRepository {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        Ok(self.dishes.read().map_err(|_| poisoned())?.clone())
    }

    async fn search_dishes(&self, term: &str) -> Result<Vec<Dish>> {
        let needle = term.to_lowercase();
        let dishes = self.dishes.read().map_err(|_| poisoned())?;
        Ok(dishes
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_dish(&self, dish_id: &str) -> Result<Option<Dish>> {
        parse_object_id(dish_id)?;
        let dishes = self.dishes.read().map_err(|_| poisoned())?;
        Ok(dishes.iter().find(|d| d.id == dish_id).cloned())
    }

    async fn insert_dish(&self, fields: &DishFields) -> Result<String> {
        let id = ObjectId::new().to_hex();
        let dish = Dish {
            id: id.clone(),
            name: fields.name.clone(),
            cuisine: fields.cuisine,
            ingredients: fields.ingredients.clone(),
            preferences: fields.preferences.clone(),
            last_eaten: None,
        };
        self.dishes.write().map_err(|_| poisoned())?.push(dish);
        Ok(id)
    }

    async fn update_dish(&self, dish_id: &str, fields: &DishFields) -> Result<UpdateOutcome> {
        parse_object_id(dish_id)?;
        let mut dishes = self.dishes.write().map_err(|_| poisoned())?;
        let Some(dish) = dishes.iter_mut().find(|d| d.id == dish_id) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = dish.name != fields.name
            || dish.cuisine != fields.cuisine
            || dish.ingredients != fields.ingredients
            || dish.preferences != fields.preferences;

        dish.name = fields.name.clone();
        dish.cuisine = fields.cuisine;
        dish.ingredients = fields.ingredients.clone();
        dish.preferences = fields.preferences.clone();

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: changed as u64,
        })
    }

    async fn set_last_eaten(&self, dish_id: &str, date: DateTime<Utc>) -> Result<UpdateOutcome> {
        parse_object_id(dish_id)?;
        let mut dishes = self.dishes.write().map_err(|_| poisoned())?;
        let Some(dish) = dishes.iter_mut().find(|d| d.id == dish_id) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = dish.last_eaten != Some(date);
        dish.last_eaten = Some(date);

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: changed as u64,
        })
    }

    async fn delete_dish(&self, dish_id: &str) -> Result<u64> {
        parse_object_id(dish_id)?;
        let mut dishes = self.dishes.write().map_err(|_| poisoned())?;
        let before = dishes.len();
        dishes.retain(|d| d.id != dish_id);
        Ok((before - dishes.len()) as u64)
    }
}
