//! Router fixtures for handler tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::domain::CalendarService;
use crate::storage::memory::InMemoryConnection;
use crate::{create_router, initialize_backend};

/// Router over an empty in-memory store with the clock pinned to 2024-06-01
pub fn test_app() -> Router {
    test_app_with_password(None)
}

pub fn test_app_with_password(password: Option<&str>) -> Router {
    let calendar = CalendarService::fixed(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    let state = initialize_backend(
        Arc::new(InMemoryConnection::new()),
        calendar,
        password.map(str::to_string),
    );
    create_router(state, Vec::new())
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(json) => {
            let bytes = serde_json::to_vec(&json).unwrap();
            send_raw(app, method, uri, Some("application/json"), bytes).await
        }
        None => send_raw(app, method, uri, None, Vec::new()).await,
    }
}

/// Send an arbitrary body with an optional content type
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let body: Body = body.into();

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
