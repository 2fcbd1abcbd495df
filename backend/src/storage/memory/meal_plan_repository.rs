use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::MealSlots;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::models::meal_plan::{MealPlan, UpsertOutcome};
use crate::storage::traits::MealPlanStorage;

/// In-memory meal plan repository keyed by week start
#[derive(Default)]
pub struct MealPlanRepository {
    weeks: Mutex<HashMap<String, MealPlan>>,
}

impl MealPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("in-memory meal plan store lock poisoned")
}

#[async_trait]
impl MealPlanStorage for MealPlanRepository {
    async fn get_meal_plan(&self, week_start: &str) -> Result<Option<MealPlan>> {
        let weeks = self.weeks.lock().map_err(|_| poisoned())?;
        Ok(weeks.get(week_start).cloned())
    }

    async fn upsert_meal_plan(
        &self,
        week_start: &str,
        lunch: &MealSlots,
        dinner: &MealSlots,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        let mut weeks = self.weeks.lock().map_err(|_| poisoned())?;

        match weeks.get_mut(week_start) {
            Some(plan) => {
                // lastUpdated always moves, so a matched week is always modified
                plan.lunch = lunch.clone();
                plan.dinner = dinner.clone();
                plan.last_updated = Some(now);
                Ok(UpsertOutcome {
                    matched_count: 1,
                    modified_count: 1,
                    upserted_count: 0,
                })
            }
            None => {
                weeks.insert(
                    week_start.to_string(),
                    MealPlan {
                        week_start: week_start.to_string(),
                        lunch: lunch.clone(),
                        dinner: dinner.clone(),
                        created_at: Some(now),
                        last_updated: Some(now),
                    },
                );
                Ok(UpsertOutcome {
                    matched_count: 0,
                    modified_count: 0,
                    upserted_count: 1,
                })
            }
        }
    }

    async fn create_meal_plan_if_absent(&self, week_start: &str, now: DateTime<Utc>) -> Result<bool> {
        let mut weeks = self.weeks.lock().map_err(|_| poisoned())?;
        if weeks.contains_key(week_start) {
            return Ok(false);
        }

        weeks.insert(
            week_start.to_string(),
            MealPlan {
                week_start: week_start.to_string(),
                created_at: Some(now),
                last_updated: Some(now),
                ..MealPlan::default()
            },
        );
        Ok(true)
    }
}
