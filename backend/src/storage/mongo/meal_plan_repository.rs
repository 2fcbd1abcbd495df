use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::Collection;
use shared::MealSlots;

use super::{from_bson_datetime, to_bson_datetime};
use crate::domain::models::meal_plan::{MealPlan, UpsertOutcome};
use crate::storage::traits::MealPlanStorage;

/// Repository for the `archive` collection, one document per week
#[derive(Clone)]
pub struct MealPlanRepository {
    collection: Collection<Document>,
}

impl MealPlanRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl MealPlanStorage for MealPlanRepository {
    async fn get_meal_plan(&self, week_start: &str) -> Result<Option<MealPlan>> {
        let document = self
            .collection
            .find_one(doc! { "weekStart": week_start })
            .await
            .context("Failed to fetch meal plan")?;

        Ok(document.map(|d| meal_plan_from_document(week_start, &d)))
    }

    async fn upsert_meal_plan(
        &self,
        week_start: &str,
        lunch: &MealSlots,
        dinner: &MealSlots,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        let update = upsert_update(lunch, dinner, now)?;

        let result = self
            .collection
            .update_one(doc! { "weekStart": week_start }, update)
            .upsert(true)
            .await
            .context("Failed to save meal plan")?;

        Ok(UpsertOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: result.upserted_id.is_some() as u64,
        })
    }

    async fn create_meal_plan_if_absent(&self, week_start: &str, now: DateTime<Utc>) -> Result<bool> {
        // $setOnInsert alone leaves an existing week untouched
        let update = doc! {
            "$setOnInsert": {
                "lunch": {},
                "dinner": {},
                "createdAt": to_bson_datetime(now),
                "lastUpdated": to_bson_datetime(now),
            },
        };

        let result = self
            .collection
            .update_one(doc! { "weekStart": week_start }, update)
            .upsert(true)
            .await
            .context("Failed to initialise meal plan week")?;

        Ok(result.upserted_id.is_some())
    }
}

/// Update for a save: `createdAt` is only written when the week is inserted
fn upsert_update(lunch: &MealSlots, dinner: &MealSlots, now: DateTime<Utc>) -> Result<Document> {
    Ok(doc! {
        "$set": {
            "lunch": slots_to_document(lunch)?,
            "dinner": slots_to_document(dinner)?,
            "lastUpdated": to_bson_datetime(now),
        },
        "$setOnInsert": { "createdAt": to_bson_datetime(now) },
    })
}

fn slots_to_document(slots: &MealSlots) -> Result<Document> {
    slots
        .iter()
        .map(|(day, value)| {
            let value = to_bson(value).with_context(|| format!("Invalid meal slot {}", day))?;
            Ok((day.clone(), value))
        })
        .collect()
}

fn slots_from_document(document: &Document, key: &str) -> MealSlots {
    document
        .get_document(key)
        .map(|slots| {
            slots
                .iter()
                .map(|(day, value)| (day.clone(), value.clone().into_relaxed_extjson()))
                .collect()
        })
        .unwrap_or_default()
}

fn meal_plan_from_document(week_start: &str, document: &Document) -> MealPlan {
    let datetime = |key: &str| match document.get(key) {
        Some(Bson::DateTime(dt)) => from_bson_datetime(*dt),
        _ => None,
    };

    MealPlan {
        week_start: week_start.to_string(),
        lunch: slots_from_document(document, "lunch"),
        dinner: slots_from_document(document, "dinner"),
        created_at: datetime("createdAt"),
        last_updated: datetime("lastUpdated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn test_document_maps_slots_and_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let document = doc! {
            "weekStart": "2024-01-08",
            "lunch": { "Monday": "Ramen", "Tuesday": 3, "Wednesday": Bson::Null },
            "dinner": { "Friday": "Pizza" },
            "createdAt": to_bson_datetime(now),
        };

        let plan = meal_plan_from_document("2024-01-08", &document);
        assert_eq!(plan.lunch.len(), 3);
        assert_eq!(plan.lunch["Monday"], "Ramen");
        assert_eq!(plan.lunch["Tuesday"], json!(3));
        assert_eq!(plan.lunch["Wednesday"], Value::Null);
        assert_eq!(plan.dinner["Friday"], "Pizza");
        assert_eq!(plan.created_at, Some(now));
        assert!(plan.last_updated.is_none());
    }

    #[test]
    fn test_missing_slots_are_empty() {
        let plan = meal_plan_from_document("2024-01-08", &doc! { "weekStart": "2024-01-08" });
        assert!(plan.lunch.is_empty());
        assert!(plan.dinner.is_empty());
    }

    #[test]
    fn test_slots_to_document_keeps_values() {
        let slots = MealSlots::from([
            ("Sunday".to_string(), json!("Roast")),
            ("Monday".to_string(), Value::Null),
            ("Tuesday".to_string(), json!({ "name": "Pho", "side": ["rolls"] })),
        ]);
        let document = slots_to_document(&slots).unwrap();
        assert_eq!(document.get_str("Sunday").unwrap(), "Roast");
        assert_eq!(document.get("Monday"), Some(&Bson::Null));
        let tuesday = document.get_document("Tuesday").unwrap();
        assert_eq!(tuesday.get_str("name").unwrap(), "Pho");

        let stored = doc! { "lunch": document };
        assert_eq!(slots_from_document(&stored, "lunch"), slots);
    }

    #[test]
    fn test_created_at_is_only_set_on_insert() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let lunch = MealSlots::from([("Monday".to_string(), json!("Ramen"))]);
        let update = upsert_update(&lunch, &MealSlots::new(), now).unwrap();

        let set = update.get_document("$set").unwrap();
        assert!(set.get("createdAt").is_none());
        assert_eq!(*set.get_datetime("lastUpdated").unwrap(), to_bson_datetime(now));
        assert_eq!(set.get_document("lunch").unwrap().get_str("Monday").unwrap(), "Ramen");

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(*on_insert.get_datetime("createdAt").unwrap(), to_bson_datetime(now));
        assert!(on_insert.get("lastUpdated").is_none());
    }
}
