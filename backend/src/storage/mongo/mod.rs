//! MongoDB storage backend.
//!
//! One [`MongoConnection`] is built at startup from the configured
//! connection string. Both collections live in the same database:
//! dishes in `meals`, weekly plans in `archive`.

pub mod dish_repository;
pub mod meal_plan_repository;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database, IndexModel};
use std::sync::Arc;
use tracing::info;

pub use dish_repository::DishRepository;
pub use meal_plan_repository::MealPlanRepository;

use crate::storage::traits::{Connection, DishStorage, MealPlanStorage};

pub const DISHES_COLLECTION: &str = "meals";
pub const MEAL_PLANS_COLLECTION: &str = "archive";

/// Handle on the MongoDB database used by the service
#[derive(Clone)]
pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    /// Build a client for `uri` and select `database_name`
    ///
    /// The driver connects lazily; call [`Connection::ping`] to verify the
    /// server is reachable.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("Invalid MongoDB connection string")?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.app_name = Some("meal-planner".to_string());

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        let database = client.database(database_name);

        Ok(Self { client, database })
    }

    /// Create the indexes the data model relies on
    pub async fn ensure_indexes(&self) -> Result<()> {
        let week_start_unique = IndexModel::builder()
            .keys(doc! { "weekStart": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("weekStart_unique".to_string())
                    .build(),
            )
            .build();

        self.database
            .collection::<Document>(MEAL_PLANS_COLLECTION)
            .create_index(week_start_unique)
            .await
            .context("Failed to create unique index on archive.weekStart")?;

        info!("Ensured unique index on {}.weekStart", MEAL_PLANS_COLLECTION);
        Ok(())
    }
}

#[async_trait]
impl Connection for MongoConnection {
    fn dish_storage(&self) -> Arc<dyn DishStorage> {
        Arc::new(DishRepository::new(
            self.database.collection(DISHES_COLLECTION),
        ))
    }

    fn meal_plan_storage(&self) -> Arc<dyn MealPlanStorage> {
        Arc::new(MealPlanRepository::new(
            self.database.collection(MEAL_PLANS_COLLECTION),
        ))
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}

pub(crate) fn to_bson_datetime(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

pub(crate) fn from_bson_datetime(dt: BsonDateTime) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(dt.timestamp_millis()).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_conversion_keeps_millisecond_precision() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 10, 18, 30, 5).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(from_bson_datetime(to_bson_datetime(dt)), Some(dt));
    }
}
