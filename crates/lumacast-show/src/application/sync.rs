//! Playlist sync engine — reconciles an uploaded playlist against the
//! stored sequences.

use std::collections::{HashMap, HashSet};

use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use tracing::info;

use super::load_show;
use crate::domain::sequence::{DEFAULT_SEQUENCE_KIND, Sequence};
use crate::store::ShowStore;

/// One entry of the uploaded playlist.
#[derive(Debug, Clone)]
pub struct PlaylistEntry {
    /// Sequence name; the reconciliation key.
    pub name: String,
    /// Reported duration in seconds.
    pub duration: Option<i32>,
    /// Position inside the controller's playlist.
    pub index: Option<i32>,
    /// Content kind; defaults to `"SEQUENCE"` when absent.
    pub kind: Option<String>,
}

/// Reconciles the uploaded playlist against the stored sequence set.
///
/// Sequences absent from the playlist become inactive and are pushed past
/// the end of the active ordering; sequences present are retained and
/// refreshed; playlist names with no stored counterpart are created after
/// the highest previously-active order. The PSA rotation set is filtered to
/// names still present, and PSA rotation is switched off when that empties
/// it.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token and
/// `ShowError::Validation` when the playlist exceeds `limit`; in the latter
/// case the aggregate is left unmodified.
pub async fn sync_playlists(
    token: &ShowToken,
    entries: &[PlaylistEntry],
    limit: usize,
    store: &dyn ShowStore,
) -> Result<(), ShowError> {
    let mut show = load_show(token, store).await?;
    if entries.len() > limit {
        return Err(ShowError::Validation(format!(
            "playlist sync of {} sequences exceeds the configured limit of {limit}",
            entries.len()
        )));
    }

    let incoming: HashSet<String> = entries
        .iter()
        .map(|e| e.name.to_ascii_lowercase())
        .collect();

    // Deactivated sequences keep their stored order relative to each other
    // but sort past the end of the playlist.
    let mut inactive_order = i32::try_from(entries.len()).unwrap_or(i32::MAX - 1) + 1;
    let mut reconciled: Vec<Sequence> = Vec::new();
    let mut retained: HashMap<String, Sequence> = HashMap::new();
    for mut sequence in std::mem::take(&mut show.sequences) {
        if incoming.contains(&sequence.name.to_ascii_lowercase()) {
            retained.insert(sequence.name.to_ascii_lowercase(), sequence);
        } else {
            sequence.active = false;
            sequence.index = None;
            sequence.order = inactive_order;
            inactive_order += 1;
            reconciled.push(sequence);
        }
    }

    // New sequences slot in after the highest order that was active going
    // into this sync.
    let mut next_order = retained
        .values()
        .filter(|s| s.active)
        .map(|s| s.order)
        .max()
        .unwrap_or(0);

    let mut created = 0usize;
    for entry in entries {
        if let Some(mut sequence) = retained.remove(&entry.name.to_ascii_lowercase()) {
            sequence.index = Some(entry.index.unwrap_or(-1));
            sequence.active = true;
            if entry.duration.is_some() {
                sequence.duration = entry.duration;
            }
            reconciled.push(sequence);
        } else {
            next_order += 1;
            created += 1;
            reconciled.push(Sequence {
                name: entry.name.clone(),
                display_name: entry.name.clone(),
                duration: entry.duration,
                index: Some(entry.index.unwrap_or(-1)),
                order: next_order,
                active: true,
                visibility_count: 0,
                group: None,
                kind: entry
                    .kind
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SEQUENCE_KIND.to_owned()),
            });
        }
    }
    show.sequences = reconciled;

    show.psa_sequences
        .retain(|psa| incoming.contains(&psa.name.to_ascii_lowercase()));
    if show.psa_sequences.is_empty() {
        if let Some(prefs) = show.preferences.as_mut() {
            prefs.psa_enabled = false;
        }
    }

    store.save(&show).await?;
    info!(
        show = %show.show_subdomain,
        playlist_len = entries.len(),
        created,
        "synced playlists"
    );
    Ok(())
}

