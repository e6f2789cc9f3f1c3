//! Playback telemetry routes.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use lumacast_show::application::playback;

use crate::auth::PluginToken;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /updateWhatsPlaying.
#[derive(Debug, Deserialize)]
pub struct UpdateWhatsPlayingRequest {
    /// Name the controller just started playing.
    pub playlist: String,
}

/// Response for POST /updateWhatsPlaying.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPlaylistResponse {
    /// The recorded playing name.
    pub current_playlist: String,
}

/// Request body for POST /updateNextScheduledSequence.
#[derive(Debug, Deserialize)]
pub struct UpdateNextScheduledRequest {
    /// Next sequence according to the controller's schedule.
    pub sequence: String,
}

/// Response for POST /updateNextScheduledSequence.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextScheduledResponse {
    /// The recorded scheduled name.
    pub next_scheduled_sequence: String,
}

/// POST /updateWhatsPlaying
#[instrument(skip(state, request), fields(playlist = %request.playlist))]
async fn update_whats_playing(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<UpdateWhatsPlayingRequest>,
) -> Result<Json<CurrentPlaylistResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling playback update");

    let current_playlist = playback::update_whats_playing(
        &token,
        &request.playlist,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(CurrentPlaylistResponse { current_playlist }))
}

/// POST /updateNextScheduledSequence
#[instrument(skip(state, request))]
async fn update_next_scheduled(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<UpdateNextScheduledRequest>,
) -> Result<Json<NextScheduledResponse>, ApiError> {
    let next_scheduled_sequence =
        playback::update_next_scheduled(&token, &request.sequence, state.store.as_ref()).await?;
    Ok(Json(NextScheduledResponse {
        next_scheduled_sequence,
    }))
}

/// Returns the playback router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/updateWhatsPlaying", post(update_whats_playing))
        .route("/updateNextScheduledSequence", post(update_next_scheduled))
}
