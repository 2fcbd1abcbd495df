use chrono::{DateTime, Utc};
use shared::MealSlots;

/// One week of the calendar, keyed by the Monday it starts on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MealPlan {
    /// `yyyy-MM-dd`
    pub week_start: String,
    pub lunch: MealSlots,
    pub dinner: MealSlots,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Counts reported by an upsert, mirroring the driver's update result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
}
