//! Conversions between the calendar DTOs in `shared` and the domain types.

use shared::{
    InitialiseWeeksResponse, MealPlanNotFoundResponse, MealPlanResponse, MealSlots,
    SaveMealPlanRequest, SaveMealPlanResponse, UpsertSummary,
};

use crate::domain::commands::meal_plan::{
    InitialiseWeeksResult, SaveMealPlanCommand, SaveMealPlanResult,
};
use crate::domain::models::meal_plan::MealPlan;

pub struct MealPlanMapper;

impl MealPlanMapper {
    pub fn to_response(plan: MealPlan) -> MealPlanResponse {
        MealPlanResponse {
            lunch: plan.lunch,
            dinner: plan.dinner,
        }
    }

    /// Empty week returned alongside a 404
    pub fn to_not_found_response(message: String) -> MealPlanNotFoundResponse {
        MealPlanNotFoundResponse {
            message,
            lunch: MealSlots::new(),
            dinner: MealSlots::new(),
        }
    }

    pub fn to_save_command(request: SaveMealPlanRequest) -> SaveMealPlanCommand {
        SaveMealPlanCommand {
            week_start: request.week_start,
            lunch: request.lunch,
            dinner: request.dinner,
        }
    }

    pub fn to_save_response(result: SaveMealPlanResult) -> SaveMealPlanResponse {
        SaveMealPlanResponse {
            message: "Meal plan saved successfully".to_string(),
            week_start: result.week_start,
            result: UpsertSummary {
                matched_count: result.outcome.matched_count,
                modified_count: result.outcome.modified_count,
                upserted_count: result.outcome.upserted_count,
            },
        }
    }

    pub fn to_initialise_response(result: InitialiseWeeksResult) -> InitialiseWeeksResponse {
        InitialiseWeeksResponse {
            message: "Week initialisation complete".to_string(),
            initialized_weeks: result.initialised_weeks,
        }
    }
}
