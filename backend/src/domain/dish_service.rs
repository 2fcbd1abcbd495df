use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::calendar::CalendarService;
use crate::domain::commands::dish::{
    CreateDishCommand, CreateDishResult, DeleteDishResult, SearchDishesQuery, UpdateDishCommand,
    UpdateDishResult, UpdateLastEatenCommand, UpdateLastEatenResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::last_eaten::{decide, is_future, parse_last_eaten, LastEatenDecision};
use crate::domain::models::dish::{Dish, DishFields};
use crate::storage::parse_object_id;
use crate::storage::traits::DishStorage;

/// Service for the dish catalogue and the last-eaten rule
#[derive(Clone)]
pub struct DishService {
    dishes: Arc<dyn DishStorage>,
    calendar: CalendarService,
}

impl DishService {
    pub fn new(dishes: Arc<dyn DishStorage>, calendar: CalendarService) -> Self {
        Self { dishes, calendar }
    }

    /// List every dish
    pub async fn list_dishes(&self) -> DomainResult<Vec<Dish>> {
        info!("Listing all dishes");
        let dishes = self.dishes.list_dishes().await?;
        info!("Found {} dishes", dishes.len());
        Ok(dishes)
    }

    /// Case-insensitive name search; the term is matched as given, spaces included
    pub async fn search_dishes(&self, query: SearchDishesQuery) -> DomainResult<Vec<Dish>> {
        let term = query
            .name
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Validation("Search term is required".to_string()))?;

        info!("Searching dishes for '{}'", term);
        let dishes = self.dishes.search_dishes(term).await?;
        info!("Search for '{}' matched {} dishes", term, dishes.len());
        Ok(dishes)
    }

    /// Get a single dish
    pub async fn get_dish(&self, dish_id: &str) -> DomainResult<Dish> {
        info!("Getting dish: {}", dish_id);
        self.dishes.get_dish(dish_id).await?.ok_or_else(|| {
            warn!("Dish not found: {}", dish_id);
            DomainError::NotFound("Dish not found".to_string())
        })
    }

    /// Create a new dish
    pub async fn create_dish(&self, command: CreateDishCommand) -> DomainResult<CreateDishResult> {
        info!("Creating dish: name={}, cuisine={}", command.name, command.cuisine);

        let fields = DishFields::new(
            &command.name,
            command.cuisine,
            command.ingredients,
            command.preferences,
        )
        .map_err(|e| DomainError::Validation(e.to_string()))?;

        let dish_id = self.dishes.insert_dish(&fields).await?;
        info!("Created dish: {} with ID: {}", fields.name, dish_id);

        Ok(CreateDishResult { dish_id })
    }

    /// Overwrite name, cuisine, ingredients and preferences
    ///
    /// An unknown id is not an error; it shows up as `matched_count == 0`.
    pub async fn update_dish(&self, command: UpdateDishCommand) -> DomainResult<UpdateDishResult> {
        info!("Updating dish: {}", command.dish_id);

        let fields = DishFields::new(
            &command.name,
            command.cuisine,
            command.ingredients,
            command.preferences,
        )
        .map_err(|e| DomainError::Validation(e.to_string()))?;

        let outcome = self.dishes.update_dish(&command.dish_id, &fields).await?;
        if outcome.matched_count == 0 {
            warn!("Update matched no dish: {}", command.dish_id);
        } else {
            info!(
                "Updated dish {} (modified {})",
                command.dish_id, outcome.modified_count
            );
        }

        Ok(UpdateDishResult { outcome })
    }

    /// Delete a dish
    pub async fn delete_dish(&self, dish_id: &str) -> DomainResult<DeleteDishResult> {
        info!("Deleting dish: {}", dish_id);
        let deleted_count = self.dishes.delete_dish(dish_id).await?;
        if deleted_count == 0 {
            warn!("Delete matched no dish: {}", dish_id);
        }
        Ok(DeleteDishResult { deleted_count })
    }

    /// Apply the last-eaten rule
    ///
    /// The id must be well formed, but the future check runs before the dish
    /// is loaded, so a future date is reported as skipped even for an id that
    /// does not exist.
    pub async fn update_last_eaten(
        &self,
        command: UpdateLastEatenCommand,
    ) -> DomainResult<UpdateLastEatenResult> {
        parse_object_id(&command.dish_id)?;

        let raw = command
            .last_eaten
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::Validation("lastEaten is required".to_string()))?;

        let proposed = parse_last_eaten(raw)?;
        let end_of_today = self.calendar.end_of_today();

        info!("Updating last eaten for dish {} to {}", command.dish_id, proposed);

        if is_future(proposed, end_of_today) {
            warn!(
                "Skipping last eaten update for dish {}: {} is in the future",
                command.dish_id, proposed
            );
            return Ok(UpdateLastEatenResult::SkippedFuture { proposed });
        }

        let dish = self.get_dish(&command.dish_id).await?;

        match decide(proposed, dish.last_eaten, end_of_today) {
            LastEatenDecision::Future => Ok(UpdateLastEatenResult::SkippedFuture { proposed }),
            LastEatenDecision::NotMoreRecent { current } => {
                info!(
                    "Skipping last eaten update for dish {}: {} is not after {}",
                    command.dish_id, proposed, current
                );
                Ok(UpdateLastEatenResult::SkippedNotMoreRecent { current, proposed })
            }
            LastEatenDecision::Update { previous } => {
                let outcome = self.dishes.set_last_eaten(&command.dish_id, proposed).await?;
                info!(
                    "Updated last eaten for dish {} from {:?} to {}",
                    command.dish_id, previous, proposed
                );
                Ok(UpdateLastEatenResult::Updated {
                    previous,
                    new: proposed,
                    modified_count: outcome.modified_count,
                })
            }
        }
    }
}
