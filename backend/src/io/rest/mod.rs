//! # REST API Interface Layer
//!
//! HTTP endpoints of the meal planner, one module per resource:
//!
//! - `/record`: dish catalogue ([`dish_apis`])
//! - `/api/calendar`: weekly meal plans ([`calendar_apis`])
//! - `/api/auth`: access gate check ([`auth_apis`])
//! - `/health`: liveness and readiness ([`health_apis`])
//!
//! Every handler logs the request line, converts the body into a domain
//! command and renders errors through [`error::ApiError`].

pub mod auth_apis;
pub mod calendar_apis;
pub mod dish_apis;
pub mod error;
pub mod extract;
pub mod health_apis;
pub mod mappers;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
