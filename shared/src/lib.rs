use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Day label (e.g. "Monday") to whatever the client stored for that slot,
/// usually a dish name. Values are kept as sent.
pub type MealSlots = BTreeMap<String, serde_json::Value>;

/// Cuisine a dish belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cuisine {
    #[default]
    Asian,
    Chinese,
    Japanese,
    Western,
}

impl Cuisine {
    pub const ALL: [Cuisine; 4] = [
        Cuisine::Asian,
        Cuisine::Chinese,
        Cuisine::Japanese,
        Cuisine::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Asian => "asian",
            Cuisine::Chinese => "chinese",
            Cuisine::Japanese => "japanese",
            Cuisine::Western => "western",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cuisine: {0}")]
pub struct UnknownCuisine(pub String);

impl FromStr for Cuisine {
    type Err = UnknownCuisine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuisine::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCuisine(s.to_string()))
    }
}

/// A dish record as returned by the `/record` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Hex encoded database id
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub cuisine: Cuisine,
    /// Ingredient tags such as "chicken" or "noodles"
    pub ingredients: Vec<String>,
    /// Lowercased names of the people who like this dish
    pub preferences: Vec<String>,
    /// When the dish was last cooked, absent if never logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_eaten: Option<DateTime<Utc>>,
}

/// Body for creating or fully updating a dish
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cuisine: Cuisine,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDishResponse {
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDishResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Body for `PATCH /record/:id/last-eaten`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLastEatenRequest {
    /// ISO-8601 date or date-time
    #[serde(default)]
    pub last_eaten: Option<String>,
}

/// The stored date was replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEatenUpdated {
    pub message: String,
    pub previous_date: Option<DateTime<Utc>>,
    pub new_date: DateTime<Utc>,
    pub modified_count: u64,
    pub skipped: bool,
}

/// The stored date was left untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEatenSkipped {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_last_eaten: Option<DateTime<Utc>>,
    pub proposed_date: DateTime<Utc>,
    pub skipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastEatenResponse {
    Updated(LastEatenUpdated),
    Skipped(LastEatenSkipped),
}

impl LastEatenResponse {
    pub fn is_skipped(&self) -> bool {
        matches!(self, LastEatenResponse::Skipped(_))
    }
}

// Calendar

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub lunch: MealSlots,
    pub dinner: MealSlots,
}

/// Returned with a 404 so the calendar can still render an empty week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanNotFoundResponse {
    pub message: String,
    pub lunch: MealSlots,
    pub dinner: MealSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealPlanRequest {
    /// Monday of the week, `yyyy-MM-dd`
    #[serde(default)]
    pub week_start: Option<String>,
    #[serde(default)]
    pub lunch: Option<MealSlots>,
    #[serde(default)]
    pub dinner: Option<MealSlots>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSummary {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealPlanResponse {
    pub message: String,
    pub week_start: String,
    pub result: UpsertSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialiseWeeksResponse {
    pub message: String,
    /// Week starts (`yyyy-MM-dd`) that did not exist before this call
    pub initialized_weeks: Vec<String>,
}

// Access gate

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyAccessRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyAccessResponse {
    pub success: bool,
    pub message: String,
}

// Health

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body shared by every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_cuisine_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_value(Cuisine::Japanese).unwrap(), json!("japanese"));
        let parsed: Cuisine = serde_json::from_value(json!("western")).unwrap();
        assert_eq!(parsed, Cuisine::Western);
        assert!(serde_json::from_value::<Cuisine>(json!("french")).is_err());
    }

    #[test]
    fn test_cuisine_from_str_ignores_case() {
        assert_eq!("Chinese".parse::<Cuisine>().unwrap(), Cuisine::Chinese);
        assert_eq!(
            "thai".parse::<Cuisine>(),
            Err(UnknownCuisine("thai".to_string()))
        );
    }

    #[test]
    fn test_dish_serializes_mongo_style_id() {
        let dish = Dish {
            id: "65a000000000000000000001".to_string(),
            name: "Mapo tofu".to_string(),
            cuisine: Cuisine::Chinese,
            ingredients: vec!["pork".to_string()],
            preferences: vec!["haley".to_string()],
            last_eaten: None,
        };

        let value = serde_json::to_value(&dish).unwrap();
        assert_eq!(value["_id"], json!("65a000000000000000000001"));
        assert!(value.get("lastEaten").is_none());
    }

    #[test]
    fn test_dish_request_defaults_missing_fields() {
        let request: DishRequest = serde_json::from_value(json!({
            "name": "Toast",
            "lastEaten": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(request.cuisine, Cuisine::Asian);
        assert!(request.ingredients.is_empty());
        assert!(request.preferences.is_empty());
    }

    #[test]
    fn test_last_eaten_response_shapes() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let updated = LastEatenResponse::Updated(LastEatenUpdated {
            message: "ok".to_string(),
            previous_date: None,
            new_date: date,
            modified_count: 1,
            skipped: false,
        });
        let value = serde_json::to_value(&updated).unwrap();
        assert_eq!(value["previousDate"], serde_json::Value::Null);
        assert_eq!(value["modifiedCount"], json!(1));
        assert!(!updated.is_skipped());

        let skipped = LastEatenResponse::Skipped(LastEatenSkipped {
            message: "skip".to_string(),
            current_last_eaten: None,
            proposed_date: date,
            skipped: true,
        });
        let value = serde_json::to_value(&skipped).unwrap();
        assert_eq!(value["skipped"], json!(true));
        assert!(value.get("currentLastEaten").is_none());
        assert!(skipped.is_skipped());
    }

    #[test]
    fn test_initialise_weeks_response_field_name() {
        let response = InitialiseWeeksResponse {
            message: "done".to_string(),
            initialized_weeks: vec!["2024-01-08".to_string()],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["initializedWeeks"], json!(["2024-01-08"]));
    }
}
