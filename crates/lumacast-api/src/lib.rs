//! Lumacast HTTP API.
//!
//! One flat, token-guarded route per control-plane operation, in the path
//! shapes the on-site plugin already speaks.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::sync::router())
        .merge(routes::playback::router())
        .merge(routes::queue::router())
        .merge(routes::voting::router())
        .merge(routes::settings::router())
        .with_state(state)
}
