//! Queue engine — FIFO-by-position dequeue of jukebox requests.

use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use serde::Serialize;
use tracing::info;

use super::load_show;
use crate::store::ShowStore;

/// Result of a dequeue; the empty queue is a defined sentinel, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DequeueOutcome {
    /// Name of the next sequence to play, `None` when the queue is empty.
    pub next_playlist: Option<String>,
    /// Controller playlist index of that sequence, `-1` when unknown or
    /// empty.
    pub playlist_index: i32,
}

impl DequeueOutcome {
    /// The empty-queue sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            next_playlist: None,
            playlist_index: -1,
        }
    }
}

/// Dequeues the request with the lowest position (first encountered wins a
/// tie), hides the played sequence or its group for the configured cooldown,
/// and removes the request.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token and
/// `ShowError::PreferencesMissing` when the aggregate carries no
/// preferences.
pub async fn next_in_queue(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<DequeueOutcome, ShowError> {
    let mut show = load_show(token, store).await?;
    if show.requests.is_empty() {
        return Ok(DequeueOutcome::empty());
    }
    let hide_count = show.preferences()?.hide_sequence_count;

    let mut chosen = 0;
    for (index, request) in show.requests.iter().enumerate().skip(1) {
        if request.position < show.requests[chosen].position {
            chosen = index;
        }
    }
    let request = show.requests.remove(chosen);
    show.hide_after_play(&request.sequence_name, hide_count);

    let playlist_index = show
        .sequence_by_name(&request.sequence_name)
        .and_then(|s| s.index)
        .unwrap_or(-1);

    store.save(&show).await?;
    info!(
        show = %show.show_subdomain,
        next = %request.sequence_name,
        remaining = show.requests.len(),
        "dequeued jukebox request"
    );
    Ok(DequeueOutcome {
        next_playlist: Some(request.sequence_name),
        playlist_index,
    })
}

/// Whether any jukebox request is waiting; read-only.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token.
pub async fn has_pending_requests(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<bool, ShowError> {
    let show = load_show(token, store).await?;
    Ok(!show.requests.is_empty())
}

/// Clears the request queue and the votes that mirror it.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token.
pub async fn purge_queue(token: &ShowToken, store: &dyn ShowStore) -> Result<(), ShowError> {
    let mut show = load_show(token, store).await?;
    show.requests.clear();
    show.votes.clear();
    store.save(&show).await?;
    info!(show = %show.show_subdomain, "purged request queue");
    Ok(())
}

