use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;
use shared::Cuisine;
use tracing::{debug, warn};

use super::{from_bson_datetime, to_bson_datetime};
use crate::domain::last_eaten::parse_last_eaten;
use crate::domain::models::dish::{Dish, DishFields};
use crate::domain::models::UpdateOutcome;
use crate::storage::parse_object_id;
use crate::storage::traits::DishStorage;

/// Repository for the `meals` collection
#[derive(Clone)]
pub struct DishRepository {
    collection: Collection<Document>,
}

impl DishRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    async fn find_dishes(&self, filter: Document) -> Result<Vec<Dish>> {
        let documents: Vec<Document> = self
            .collection
            .find(filter)
            .await
            .context("Failed to query meals")?
            .try_collect()
            .await
            .context("Failed to read meals cursor")?;

        documents.into_iter().map(dish_from_document).collect()
    }
}

#[async_trait]
impl DishStorage for DishRepository {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        self.find_dishes(doc! {}).await
    }

    async fn search_dishes(&self, term: &str) -> Result<Vec<Dish>> {
        // The search term is matched literally, not as a pattern
        let filter = doc! {
            "name": { "$regex": regex::escape(term), "$options": "i" }
        };
        self.find_dishes(filter).await
    }

    async fn get_dish(&self, dish_id: &str) -> Result<Option<Dish>> {
        let id = parse_object_id(dish_id)?;
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .context("Failed to fetch dish")?
            .map(dish_from_document)
            .transpose()
    }

    async fn insert_dish(&self, fields: &DishFields) -> Result<String> {
        let result = self
            .collection
            .insert_one(fields_to_document(fields))
            .await
            .context("Failed to insert dish")?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .context("Inserted dish did not receive an ObjectId")?;

        debug!("Inserted dish {} with id {}", fields.name, id);
        Ok(id)
    }

    async fn update_dish(&self, dish_id: &str, fields: &DishFields) -> Result<UpdateOutcome> {
        let id = parse_object_id(dish_id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields_to_document(fields) })
            .await
            .context("Failed to update dish")?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn set_last_eaten(&self, dish_id: &str, date: DateTime<Utc>) -> Result<UpdateOutcome> {
        let id = parse_object_id(dish_id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "lastEaten": to_bson_datetime(date) } },
            )
            .await
            .context("Failed to update last eaten date")?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_dish(&self, dish_id: &str) -> Result<u64> {
        let id = parse_object_id(dish_id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .context("Failed to delete dish")?;
        Ok(result.deleted_count)
    }
}

fn fields_to_document(fields: &DishFields) -> Document {
    doc! {
        "name": fields.name.as_str(),
        "cuisine": fields.cuisine.as_str(),
        "ingredients": fields.ingredients.clone(),
        "preferences": fields.preferences.clone(),
    }
}

/// Map a stored document onto a [`Dish`].
///
/// Documents are schemaless, so missing or mistyped fields fall back to
/// defaults instead of failing the whole listing. Only the `_id` is required.
/// A cuisine outside the known set is logged and read as the default; the
/// stored value is only replaced if the dish is saved again.
pub(crate) fn dish_from_document(document: Document) -> Result<Dish> {
    let id = document
        .get_object_id("_id")
        .context("Dish document has no ObjectId _id")?
        .to_hex();

    let cuisine = match document.get_str("cuisine") {
        Ok(raw) => raw.parse::<Cuisine>().unwrap_or_else(|e| {
            warn!("Dish {}: {}, defaulting", id, e);
            Cuisine::default()
        }),
        Err(_) => Cuisine::default(),
    };

    let last_eaten = match document.get("lastEaten") {
        Some(Bson::DateTime(dt)) => from_bson_datetime(*dt),
        // Older documents stored the raw client string
        Some(Bson::String(raw)) => parse_last_eaten(raw).ok(),
        _ => None,
    };

    Ok(Dish {
        name: document.get_str("name").unwrap_or_default().to_string(),
        cuisine,
        ingredients: string_array(&document, "ingredients"),
        preferences: string_array(&document, "preferences"),
        last_eaten,
        id,
    })
}

fn string_array(document: &Document, key: &str) -> Vec<String> {
    document
        .get_array(key)
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_full_document_maps_every_field() {
        let oid = ObjectId::new();
        let eaten = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let document = doc! {
            "_id": oid,
            "name": "Katsu curry",
            "cuisine": "japanese",
            "ingredients": ["pork", "rice"],
            "preferences": ["ryan"],
            "lastEaten": to_bson_datetime(eaten),
        };

        let dish = dish_from_document(document).unwrap();
        assert_eq!(dish.id, oid.to_hex());
        assert_eq!(dish.name, "Katsu curry");
        assert_eq!(dish.cuisine, Cuisine::Japanese);
        assert_eq!(dish.ingredients, vec!["pork", "rice"]);
        assert_eq!(dish.preferences, vec!["ryan"]);
        assert_eq!(dish.last_eaten, Some(eaten));
    }

    #[test]
    fn test_sparse_document_uses_defaults() {
        let dish = dish_from_document(doc! { "_id": ObjectId::new(), "name": "Toast" }).unwrap();
        assert_eq!(dish.cuisine, Cuisine::Asian);
        assert!(dish.ingredients.is_empty());
        assert!(dish.last_eaten.is_none());
    }

    #[test]
    fn test_unknown_stored_cuisine_reads_as_default() {
        let dish = dish_from_document(doc! {
            "_id": ObjectId::new(),
            "name": "Kimchi stew",
            "cuisine": "korean",
        })
        .unwrap();
        assert_eq!(dish.name, "Kimchi stew");
        assert_eq!(dish.cuisine, Cuisine::Asian);
    }

    #[test]
    fn test_legacy_string_last_eaten_is_parsed() {
        let dish = dish_from_document(doc! {
            "_id": ObjectId::new(),
            "name": "Pho",
            "lastEaten": "2024-01-05",
        })
        .unwrap();
        assert_eq!(
            dish.last_eaten,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_document_without_object_id_is_rejected() {
        assert!(dish_from_document(doc! { "_id": "abc", "name": "Soup" }).is_err());
    }

    #[test]
    fn test_fields_document_shape() {
        let fields = DishFields::new(
            "Bibimbap",
            Cuisine::Asian,
            vec!["rice".to_string()],
            vec![],
        )
        .unwrap();
        let document = fields_to_document(&fields);
        assert_eq!(document.get_str("cuisine").unwrap(), "asian");
        assert_eq!(document.get_array("ingredients").unwrap().len(), 1);
        assert!(document.get("lastEaten").is_none());
    }
}
