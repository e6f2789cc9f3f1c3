//! Playlist sync route.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use lumacast_show::application::sync::{self, PlaylistEntry};

use crate::auth::PluginToken;
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Request body for POST /syncPlaylists.
#[derive(Debug, Deserialize)]
pub struct SyncPlaylistsRequest {
    /// The playlist as the controller currently sees it, in play order.
    pub playlists: Vec<SyncPlaylistDetails>,
}

/// One playlist entry in the plugin's wire shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPlaylistDetails {
    /// Sequence name.
    pub playlist_name: String,
    /// Duration in seconds.
    #[serde(default)]
    pub playlist_duration: Option<i32>,
    /// Position inside the controller's playlist.
    #[serde(default)]
    pub playlist_index: Option<i32>,
    /// Content kind.
    #[serde(default)]
    pub playlist_type: Option<String>,
}

/// POST /syncPlaylists
#[instrument(skip(state, request), fields(playlist_len = request.playlists.len()))]
async fn sync_playlists(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<SyncPlaylistsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling playlist sync");

    let entries: Vec<PlaylistEntry> = request
        .playlists
        .into_iter()
        .map(|p| PlaylistEntry {
            name: p.playlist_name,
            duration: p.playlist_duration,
            index: p.playlist_index,
            kind: p.playlist_type,
        })
        .collect();

    sync::sync_playlists(&token, &entries, state.playlist_sync_limit, state.store.as_ref())
        .await?;
    Ok(Json(MessageResponse::success()))
}

/// Returns the playlist sync router.
pub fn router() -> Router<AppState> {
    Router::new().route("/syncPlaylists", post(sync_playlists))
}
