//! Voting routes.

use axum::extract::State;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use lumacast_show::application::voting::{self, TallyOutcome};

use crate::auth::PluginToken;
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// GET /highestVotedPlaylist
#[instrument(skip(state))]
async fn highest_voted_playlist(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<TallyOutcome>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling vote tally");

    let outcome =
        voting::highest_voted(&token, state.clock.as_ref(), state.store.as_ref()).await?;
    Ok(Json(outcome))
}

/// DELETE /resetAllVotes
#[instrument(skip(state))]
async fn reset_all_votes(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<MessageResponse>, ApiError> {
    voting::reset_all_votes(&token, state.store.as_ref()).await?;
    Ok(Json(MessageResponse::success()))
}

/// Returns the voting router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/highestVotedPlaylist", get(highest_voted_playlist))
        .route("/resetAllVotes", delete(reset_all_votes))
}
