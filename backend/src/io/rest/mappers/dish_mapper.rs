//! Conversions between the dish DTOs in `shared` and the domain types.

use shared::{
    DeleteDishResponse, Dish as SharedDish, DishRequest, InsertDishResponse, LastEatenResponse,
    LastEatenSkipped, LastEatenUpdated, UpdateDishResponse, UpdateLastEatenRequest,
};

use crate::domain::commands::dish::{
    CreateDishCommand, CreateDishResult, DeleteDishResult, UpdateDishCommand, UpdateDishResult,
    UpdateLastEatenCommand, UpdateLastEatenResult,
};
use crate::domain::models::dish::Dish as DomainDish;

pub const LAST_EATEN_UPDATED: &str = "Last eaten date updated successfully";
pub const LAST_EATEN_FUTURE: &str = "Date is in the future, last eaten not updated";
pub const LAST_EATEN_NOT_MORE_RECENT: &str = "New date is not more recent, last eaten not updated";

/// Mapper between dish DTOs and domain commands/models
pub struct DishMapper;

impl DishMapper {
    pub fn to_dto(domain: DomainDish) -> SharedDish {
        SharedDish {
            id: domain.id,
            name: domain.name,
            cuisine: domain.cuisine,
            ingredients: domain.ingredients,
            preferences: domain.preferences,
            last_eaten: domain.last_eaten,
        }
    }

    pub fn to_dto_list(dishes: Vec<DomainDish>) -> Vec<SharedDish> {
        dishes.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: DishRequest) -> CreateDishCommand {
        CreateDishCommand {
            name: request.name,
            cuisine: request.cuisine,
            ingredients: request.ingredients,
            preferences: request.preferences,
        }
    }

    pub fn to_update_command(dish_id: String, request: DishRequest) -> UpdateDishCommand {
        UpdateDishCommand {
            dish_id,
            name: request.name,
            cuisine: request.cuisine,
            ingredients: request.ingredients,
            preferences: request.preferences,
        }
    }

    pub fn to_last_eaten_command(dish_id: String, request: UpdateLastEatenRequest) -> UpdateLastEatenCommand {
        UpdateLastEatenCommand {
            dish_id,
            last_eaten: request.last_eaten,
        }
    }

    pub fn to_insert_response(result: CreateDishResult) -> InsertDishResponse {
        InsertDishResponse {
            inserted_id: result.dish_id,
        }
    }

    pub fn to_update_response(result: UpdateDishResult) -> UpdateDishResponse {
        UpdateDishResponse {
            acknowledged: true,
            matched_count: result.outcome.matched_count,
            modified_count: result.outcome.modified_count,
        }
    }

    pub fn to_delete_response(result: DeleteDishResult) -> DeleteDishResponse {
        DeleteDishResponse {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }

    pub fn to_last_eaten_response(result: UpdateLastEatenResult) -> LastEatenResponse {
        match result {
            UpdateLastEatenResult::Updated {
                previous,
                new,
                modified_count,
            } => LastEatenResponse::Updated(LastEatenUpdated {
                message: LAST_EATEN_UPDATED.to_string(),
                previous_date: previous,
                new_date: new,
                modified_count,
                skipped: false,
            }),
            UpdateLastEatenResult::SkippedFuture { proposed } => {
                LastEatenResponse::Skipped(LastEatenSkipped {
                    message: LAST_EATEN_FUTURE.to_string(),
                    current_last_eaten: None,
                    proposed_date: proposed,
                    skipped: true,
                })
            }
            UpdateLastEatenResult::SkippedNotMoreRecent { current, proposed } => {
                LastEatenResponse::Skipped(LastEatenSkipped {
                    message: LAST_EATEN_NOT_MORE_RECENT.to_string(),
                    current_last_eaten: Some(current),
                    proposed_date: proposed,
                    skipped: true,
                })
            }
        }
    }
}
