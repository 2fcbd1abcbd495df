//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod dish {
    use chrono::{DateTime, Utc};
    use shared::Cuisine;

    use crate::domain::models::UpdateOutcome;

    /// Input for creating a new dish.
    #[derive(Debug, Clone)]
    pub struct CreateDishCommand {
        pub name: String,
        pub cuisine: Cuisine,
        pub ingredients: Vec<String>,
        pub preferences: Vec<String>,
    }

    /// Input for overwriting the editable fields of a dish.
    #[derive(Debug, Clone)]
    pub struct UpdateDishCommand {
        pub dish_id: String,
        pub name: String,
        pub cuisine: Cuisine,
        pub ingredients: Vec<String>,
        pub preferences: Vec<String>,
    }

    /// Name search; `None` or blank is a validation error.
    #[derive(Debug, Clone, Default)]
    pub struct SearchDishesQuery {
        pub name: Option<String>,
    }

    /// Input for the last-eaten rule.
    #[derive(Debug, Clone)]
    pub struct UpdateLastEatenCommand {
        pub dish_id: String,
        pub last_eaten: Option<String>,
    }

    /// Result of creating a dish.
    #[derive(Debug, Clone)]
    pub struct CreateDishResult {
        pub dish_id: String,
    }

    /// Result of a full-field update.
    #[derive(Debug, Clone)]
    pub struct UpdateDishResult {
        pub outcome: UpdateOutcome,
    }

    /// Result of deleting a dish.
    #[derive(Debug, Clone)]
    pub struct DeleteDishResult {
        pub deleted_count: u64,
    }

    /// Result of applying the last-eaten rule.
    #[derive(Debug, Clone, PartialEq)]
    pub enum UpdateLastEatenResult {
        Updated {
            previous: Option<DateTime<Utc>>,
            new: DateTime<Utc>,
            modified_count: u64,
        },
        SkippedFuture {
            proposed: DateTime<Utc>,
        },
        SkippedNotMoreRecent {
            current: DateTime<Utc>,
            proposed: DateTime<Utc>,
        },
    }
}

pub mod meal_plan {
    use shared::MealSlots;

    use crate::domain::models::meal_plan::UpsertOutcome;

    /// Input for saving a week; missing slots are stored as empty maps.
    #[derive(Debug, Clone, Default)]
    pub struct SaveMealPlanCommand {
        pub week_start: Option<String>,
        pub lunch: Option<MealSlots>,
        pub dinner: Option<MealSlots>,
    }

    /// Result of saving a week.
    #[derive(Debug, Clone)]
    pub struct SaveMealPlanResult {
        pub week_start: String,
        pub outcome: UpsertOutcome,
    }

    /// Result of initialising the upcoming weeks.
    #[derive(Debug, Clone)]
    pub struct InitialiseWeeksResult {
        pub initialised_weeks: Vec<String>,
    }
}

pub mod access {
    /// Password typed into the access gate.
    #[derive(Debug, Clone)]
    pub struct VerifyAccessCommand {
        pub password: String,
    }

    /// Result of checking the password.
    #[derive(Debug, Clone, PartialEq)]
    pub struct VerifyAccessResult {
        pub success: bool,
        pub message: String,
    }
}
