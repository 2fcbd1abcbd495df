use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::calendar::{format_week_start, CalendarService};
use crate::domain::commands::meal_plan::{
    InitialiseWeeksResult, SaveMealPlanCommand, SaveMealPlanResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::meal_plan::MealPlan;
use crate::storage::traits::MealPlanStorage;

/// Number of weeks, starting with the current one, that initialisation creates
pub const WEEKS_TO_INITIALISE: u32 = 3;

/// Service for the weekly lunch/dinner calendar
#[derive(Clone)]
pub struct MealPlanService {
    meal_plans: Arc<dyn MealPlanStorage>,
    calendar: CalendarService,
}

impl MealPlanService {
    pub fn new(meal_plans: Arc<dyn MealPlanStorage>, calendar: CalendarService) -> Self {
        Self { meal_plans, calendar }
    }

    /// Get the plan for a week
    pub async fn get_meal_plan(&self, week_start: &str) -> DomainResult<MealPlan> {
        info!("Getting meal plan for week {}", week_start);
        self.meal_plans.get_meal_plan(week_start).await?.ok_or_else(|| {
            warn!("No meal plan for week {}", week_start);
            DomainError::NotFound("No meal plan found for this week".to_string())
        })
    }

    /// Save lunch and dinner for a week, creating the week if needed
    pub async fn save_meal_plan(&self, command: SaveMealPlanCommand) -> DomainResult<SaveMealPlanResult> {
        let week_start = command
            .week_start
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .ok_or_else(|| DomainError::Validation("weekStart is required".to_string()))?
            .to_string();

        let lunch = command.lunch.unwrap_or_default();
        let dinner = command.dinner.unwrap_or_default();
        info!(
            "Saving meal plan for week {} ({} lunches, {} dinners)",
            week_start,
            lunch.len(),
            dinner.len()
        );

        let outcome = self
            .meal_plans
            .upsert_meal_plan(&week_start, &lunch, &dinner, self.calendar.now())
            .await?;

        if outcome.upserted_count > 0 {
            info!("Created meal plan for week {}", week_start);
        }

        Ok(SaveMealPlanResult { week_start, outcome })
    }

    /// Make sure the current week and the next two exist
    ///
    /// Returns only the weeks this call created.
    pub async fn initialise_weeks(&self) -> DomainResult<InitialiseWeeksResult> {
        let now = self.calendar.now();
        let mut initialised_weeks = Vec::new();

        for week in self.calendar.upcoming_week_starts(WEEKS_TO_INITIALISE) {
            let week_start = format_week_start(week);
            if self.meal_plans.create_meal_plan_if_absent(&week_start, now).await? {
                info!("Initialised week {}", week_start);
                initialised_weeks.push(week_start);
            }
        }

        info!("Initialised {} new weeks", initialised_weeks.len());
        Ok(InitialiseWeeksResult { initialised_weeks })
    }
}
