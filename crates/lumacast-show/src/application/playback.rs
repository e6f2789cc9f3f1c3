//! Playback event processor — reacts to "what is playing now" telemetry
//! from the on-site show controller.

use lumacast_core::clock::Clock;
use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use tracing::debug;

use super::{load_show, psa};
use crate::store::ShowStore;

/// Applies one playback update: records the playing name, advances the PSA
/// play-count cadence, decays every visibility cooldown by one, clears the
/// per-window viewer attribution, and runs the PSA rotation policy on the
/// play-count signal.
///
/// A PSA play resets the counter; an ordinary play increments it; a play
/// belonging to a group does not count individually, so the increment is
/// taken back.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token and
/// `ShowError::PreferencesMissing` when the aggregate carries no
/// preferences; nothing is mutated in either case.
pub async fn update_whats_playing(
    token: &ShowToken,
    playlist: &str,
    clock: &dyn Clock,
    store: &dyn ShowStore,
) -> Result<String, ShowError> {
    let mut show = load_show(token, store).await?;
    let mut plays = show.preferences()?.sequences_played;

    show.playing_now = Some(playlist.to_owned());
    if show.is_psa(playlist) {
        plays = 0;
    } else {
        plays += 1;
        if show
            .sequence_by_name(playlist)
            .is_some_and(|s| s.is_grouped())
        {
            plays -= 1;
        }
    }
    show.preferences_mut()?.sequences_played = plays;

    show.decay_visibility();
    show.clear_viewer_attribution();
    psa::apply_play_count_policy(&mut show, plays, clock);

    store.save(&show).await?;
    debug!(show = %show.show_subdomain, playlist, plays, "recorded playback update");
    Ok(playlist.to_owned())
}

/// Records the controller's own upcoming scheduled sequence.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token.
pub async fn update_next_scheduled(
    token: &ShowToken,
    sequence: &str,
    store: &dyn ShowStore,
) -> Result<String, ShowError> {
    let mut show = load_show(token, store).await?;
    show.playing_next_from_schedule = Some(sequence.to_owned());
    store.save(&show).await?;
    Ok(sequence.to_owned())
}

