//! Voting engine — tally, winner selection, and group expansion.

use lumacast_core::clock::Clock;
use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use serde::Serialize;
use tracing::info;

use super::{load_show, psa};
use crate::domain::participation::{Vote, VoteTarget};
use crate::domain::preferences::Preferences;
use crate::domain::show::Show;
use crate::store::ShowStore;

/// Weight ladder start for expanding a winning group into per-member
/// votes. Sits above the injected PSA weight so a group in mid-playout is
/// never interrupted.
const GROUP_EXPANSION_WEIGHT: i32 = 2099;

/// Result of a tally; the no-votes state is a defined sentinel, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyOutcome {
    /// Name of the winning sequence, `None` when no votes are pending.
    pub winning_playlist: Option<String>,
    /// Controller playlist index of the winner, `-1` when unknown or empty.
    pub playlist_index: i32,
}

impl TallyOutcome {
    /// The no-votes sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            winning_playlist: None,
            playlist_index: -1,
        }
    }
}

/// Index of the winning vote: maximum weight, ties broken by the earliest
/// `last_vote_time` (the oldest pending vote wins a count tie).
fn winning_vote_index(votes: &[Vote]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, vote) in votes.iter().enumerate() {
        best = match best {
            None => Some(index),
            Some(current) => {
                let leader = &votes[current];
                if vote.votes > leader.votes
                    || (vote.votes == leader.votes && vote.last_vote_time < leader.last_vote_time)
                {
                    Some(index)
                } else {
                    Some(current)
                }
            }
        };
    }
    best
}

/// Resolves the highest-voted playlist.
///
/// Each tally is a playout step: visibility cooldowns decay first, then the
/// winning vote is removed and resolved. A winning group vote is expanded
/// in place — the first member resolves immediately, the remaining members
/// are queued as descending-weight votes so the group plays out one member
/// per call. An ungrouped winner gets its cooldown and win-history entry,
/// and may trigger the win-count PSA policy when the operator leaves PSA
/// rotation unmanaged.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token and
/// `ShowError::PreferencesMissing` when the aggregate carries no
/// preferences.
pub async fn highest_voted(
    token: &ShowToken,
    clock: &dyn Clock,
    store: &dyn ShowStore,
) -> Result<TallyOutcome, ShowError> {
    let mut show = load_show(token, store).await?;
    let prefs = show.preferences()?.clone();

    show.decay_visibility();

    let Some(index) = winning_vote_index(&show.votes) else {
        store.save(&show).await?;
        return Ok(TallyOutcome::empty());
    };
    let winning = show.votes.remove(index);

    let resolved = match &winning.target {
        VoteTarget::Group(group_name) => expand_group(&mut show, group_name, &prefs, clock),
        VoteTarget::Sequence(name) => Some(name.clone()),
    };
    let outcome = match resolved {
        Some(name) => resolve_single_winner(&mut show, &name, &prefs, clock),
        // A group vote with no resolvable members is dropped.
        None => TallyOutcome::empty(),
    };

    store.save(&show).await?;
    if let Some(winner) = &outcome.winning_playlist {
        info!(show = %show.show_subdomain, winner = %winner, "resolved voting winner");
    }
    Ok(outcome)
}

/// Expands a winning group vote: records the group win, applies the group
/// cooldown, queues every member after the first as an ordinary vote with
/// descending weight, and hands the first member back for immediate
/// resolution.
fn expand_group(
    show: &mut Show,
    group_name: &str,
    prefs: &Preferences,
    clock: &dyn Clock,
) -> Option<String> {
    let now = clock.now();
    let canonical = show.group_by_name(group_name).map(|g| g.name.clone())?;
    let members = show.group_member_names(&canonical);
    if members.is_empty() {
        return None;
    }

    show.record_win(canonical.clone(), now);
    if prefs.hide_sequence_count != 0 {
        if let Some(group) = show.group_by_name_mut(&canonical) {
            group.visibility_count = prefs.hide_sequence_count + 1;
        }
    }

    let mut weight = GROUP_EXPANSION_WEIGHT;
    let mut members = members.into_iter();
    let first = members.next();
    for member in members {
        weight -= 1;
        show.votes.push(Vote {
            target: VoteTarget::Sequence(member),
            votes: weight,
            last_vote_time: now,
            owner_voted: false,
            viewers_voted: Vec::new(),
        });
    }
    first
}

/// Resolves a single-sequence winner after the winning vote was removed.
fn resolve_single_winner(
    show: &mut Show,
    winner_name: &str,
    prefs: &Preferences,
    clock: &dyn Clock,
) -> TallyOutcome {
    let now = clock.now();
    let is_psa = show.is_psa(winner_name);
    let Some((canonical, playlist_index, grouped)) = show
        .sequence_by_name(winner_name)
        .map(|s| (s.name.clone(), s.index.unwrap_or(-1), s.is_grouped()))
    else {
        // The vote referenced content that no longer exists; drop it.
        return TallyOutcome::empty();
    };

    // Vote resets only apply while no group playout is in flight.
    let group_playout_pending = show.votes.iter().any(|vote| match &vote.target {
        VoteTarget::Group(_) => true,
        VoteTarget::Sequence(name) => show
            .sequence_by_name(name)
            .is_some_and(|s| s.is_grouped()),
    });
    if !group_playout_pending && prefs.reset_votes {
        show.votes.clear();
    }

    if !grouped {
        if prefs.hide_sequence_count != 0 {
            if let Some(sequence) = show.sequence_by_name_mut(&canonical) {
                sequence.visibility_count = prefs.hide_sequence_count + 1;
            }
        }
        if !is_psa {
            show.record_win(canonical.clone(), now);
        }
        if prefs.psa_enabled && !prefs.manage_psa && !show.psa_sequences.is_empty() && !is_psa {
            psa::apply_win_count_policy(show, prefs.psa_frequency, clock);
        }
    }

    TallyOutcome {
        winning_playlist: Some(canonical),
        playlist_index,
    }
}

/// Clears every pending vote.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token.
pub async fn reset_all_votes(token: &ShowToken, store: &dyn ShowStore) -> Result<(), ShowError> {
    let mut show = load_show(token, store).await?;
    show.votes.clear();
    store.save(&show).await?;
    info!(show = %show.show_subdomain, "reset all votes");
    Ok(())
}

