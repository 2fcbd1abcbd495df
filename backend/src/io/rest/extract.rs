//! Request extractors that report failures as [`ApiError`] JSON.

use axum::extract::FromRequest;

use crate::io::rest::error::ApiError;

/// `axum::Json` whose rejections render as a 400 `{message, error}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
