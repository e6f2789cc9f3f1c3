//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeZone;
use http_body_util::BodyExt;
use lumacast_core::clock::Clock;
use lumacast_test_support::{FixedClock, InMemoryShowStore};
use tower::ServiceExt;

use lumacast_api::app;
use lumacast_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::Utc.with_ymd_and_hms(2026, 3, 9, 20, 0, 0).unwrap(),
    ))
}

/// Build the full app router over an in-memory store and a deterministic
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(store: Arc<InMemoryShowStore>) -> Router {
    app(AppState::new(store, fixed_clock(), 100))
}

/// Send a request with the show-token header and return the response.
pub async fn send_with_token(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("showtoken", token);
    let request = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            builder
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a request carrying no token header at all.
pub async fn send_without_token(
    app: Router,
    method: &str,
    uri: &str,
) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    response.status()
}
