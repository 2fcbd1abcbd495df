//! # Storage Module
//!
//! Handles data persistence for the meal planner.
//!
//! The domain layer only talks to the traits in [`traits`]. Two backends
//! implement them:
//!
//! - **mongo**: the production backend. Dishes live in the `meals`
//!   collection and weekly plans in `archive`.
//! - **memory**: lock-protected collections with the same semantics, used to
//!   exercise services and handlers without a database.
//!
//! ## Identifiers
//!
//! Dish ids are hex encoded MongoDB object ids in both backends. A string
//! that is not a valid object id is an error, not an unknown dish.

pub mod memory;
pub mod mongo;
pub mod traits;

use anyhow::{Context, Result};
use mongodb::bson::oid::ObjectId;

pub use memory::InMemoryConnection;
pub use mongo::MongoConnection;
pub use traits::{Connection, DishStorage, MealPlanStorage};

/// Parse a hex dish id into an object id
pub fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).with_context(|| format!("Invalid dish id: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
        let err = parse_object_id("42").unwrap_err();
        assert!(err.to_string().contains("Invalid dish id: 42"));
    }
}
