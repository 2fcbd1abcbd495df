use chrono::{DateTime, Utc};
use shared::Cuisine;

/// A dish as stored in the `meals` collection
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<String>,
    pub preferences: Vec<String>,
    pub last_eaten: Option<DateTime<Utc>>,
}

/// The user-editable fields of a dish, validated and normalised
///
/// Create and full-field update both write exactly these four fields;
/// `last_eaten` only changes through the last-eaten rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DishFields {
    pub name: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<String>,
    pub preferences: Vec<String>,
}

impl DishFields {
    pub fn new(
        name: &str,
        cuisine: Cuisine,
        ingredients: Vec<String>,
        preferences: Vec<String>,
    ) -> Result<Self, DishValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DishValidationError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            cuisine,
            ingredients: normalize_tags(ingredients),
            preferences: normalize_tags(preferences),
        })
    }
}

/// Tags are sets: trim, drop blanks and duplicates, keep first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DishValidationError {
    #[error("Dish name is required")]
    EmptyName,
}
