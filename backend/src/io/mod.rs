//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Handlers translate JSON request DTOs from the `shared` crate into domain
//! commands, call the services held in [`crate::AppState`] and map results
//! and [`crate::domain::DomainError`]s back onto responses and status codes.

pub mod rest;
