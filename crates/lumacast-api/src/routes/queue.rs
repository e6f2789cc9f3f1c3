//! Jukebox queue routes.

use axum::extract::{Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use lumacast_show::application::queue;

use crate::auth::PluginToken;
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Query parameters for GET /nextPlaylistInQueue.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextInQueueParams {
    /// Opaque flag the plugin round-trips through the response.
    #[serde(default)]
    pub update_queue: Option<bool>,
}

/// Response for GET /nextPlaylistInQueue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPlaylistResponse {
    /// Next sequence to play, `null` when the queue is empty.
    pub next_playlist: Option<String>,
    /// Controller playlist index of that sequence, `-1` when empty.
    pub playlist_index: i32,
    /// Echo of the `updateQueue` query flag.
    pub update_queue: Option<bool>,
}

/// GET /nextPlaylistInQueue
#[instrument(skip(state))]
async fn next_playlist_in_queue(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Query(params): Query<NextInQueueParams>,
) -> Result<Json<NextPlaylistResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling queue dequeue");

    let outcome = queue::next_in_queue(&token, state.store.as_ref()).await?;
    Ok(Json(NextPlaylistResponse {
        next_playlist: outcome.next_playlist,
        playlist_index: outcome.playlist_index,
        update_queue: params.update_queue,
    }))
}

/// POST /updatePlaylistQueue
#[instrument(skip(state))]
async fn update_playlist_queue(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<MessageResponse>, ApiError> {
    let pending = queue::has_pending_requests(&token, state.store.as_ref()).await?;
    let message = if pending { "Success" } else { "Queue Empty" };
    Ok(Json(MessageResponse {
        message: message.to_owned(),
    }))
}

/// DELETE /purgeQueue
#[instrument(skip(state))]
async fn purge_queue(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<MessageResponse>, ApiError> {
    queue::purge_queue(&token, state.store.as_ref()).await?;
    Ok(Json(MessageResponse::success()))
}

/// Returns the queue router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nextPlaylistInQueue", get(next_playlist_in_queue))
        .route("/updatePlaylistQueue", post(update_playlist_queue))
        .route("/purgeQueue", delete(purge_queue))
}
