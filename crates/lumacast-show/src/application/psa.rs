//! PSA rotation policy — when and which PSA to inject, and how.
//!
//! Two independent signals share the selection logic: the play-count signal
//! fired from playback updates when the operator manages PSAs, and the
//! win-count signal fired from voting wins when they do not.

use chrono::{DateTime, Utc};
use lumacast_core::clock::Clock;
use tracing::info;

use crate::domain::participation::{Request, Vote, VoteTarget};
use crate::domain::preferences::ViewerControlMode;
use crate::domain::show::Show;

/// Weight of an injected PSA vote; far above any organic tally, so the PSA
/// wins the next tally regardless of audience activity.
pub const PSA_VOTE_WEIGHT: i32 = 2000;

/// Index of the least-recently-played PSA, ties broken by configured order.
fn next_psa_index(show: &Show) -> Option<usize> {
    show.psa_sequences
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.last_played
                .cmp(&b.last_played)
                .then_with(|| a.order.cmp(&b.order))
        })
        .map(|(index, _)| index)
}

fn synthetic_vote(sequence_name: &str, now: DateTime<Utc>) -> Vote {
    Vote {
        target: VoteTarget::Sequence(sequence_name.to_owned()),
        votes: PSA_VOTE_WEIGHT,
        last_vote_time: now,
        owner_voted: false,
        viewers_voted: Vec::new(),
    }
}

/// Play-count signal: invoked after every playback update with the fresh
/// `sequences_played` counter.
///
/// Fires only when the counter is non-zero, PSA rotation is enabled and
/// operator-managed, the cadence is positive and divides the counter, and
/// no PSA is already playing. The selected PSA is stamped as played and
/// routed by viewer-control mode: a front-of-queue request in jukebox mode
/// (plus a synthetic vote to keep the voting surface consistent), a
/// synthetic vote in voting mode, nothing when participation is disabled.
pub fn apply_play_count_policy(show: &mut Show, plays: i32, clock: &dyn Clock) {
    let Some(prefs) = show.preferences.as_ref() else {
        return;
    };
    let enabled = prefs.psa_enabled && prefs.manage_psa;
    let frequency = prefs.psa_frequency;
    let mode = prefs.viewer_control_mode;
    if plays == 0 || !enabled || frequency <= 0 || plays % frequency != 0 {
        return;
    }
    if show.psa_playing_now() {
        return;
    }
    let Some(index) = next_psa_index(show) else {
        return;
    };
    let now = clock.now();
    show.psa_sequences[index].last_played = now;
    let psa_name = show.psa_sequences[index].name.clone();
    // Injection only lands when the PSA still resolves to real content.
    let Some(sequence_name) = show.sequence_by_name(&psa_name).map(|s| s.name.clone()) else {
        return;
    };

    match mode {
        ViewerControlMode::Jukebox => {
            if show.has_pending_psa_request() {
                return;
            }
            show.requests.insert(
                0,
                Request {
                    sequence_name: sequence_name.clone(),
                    position: 0,
                    owner_requested: false,
                    viewer_requested: None,
                },
            );
            if !show.has_pending_psa_vote() {
                show.votes.push(synthetic_vote(&sequence_name, now));
            }
            info!(show = %show.show_subdomain, psa = %sequence_name, "queued PSA at the front of the jukebox");
        }
        ViewerControlMode::Voting => {
            if show.has_pending_psa_vote() {
                return;
            }
            show.votes.push(synthetic_vote(&sequence_name, now));
            info!(show = %show.show_subdomain, psa = %sequence_name, "injected PSA vote");
        }
        ViewerControlMode::Disabled => {}
    }
}

/// Win-count signal: invoked after an ungrouped, non-PSA voting win when
/// the operator leaves PSA rotation unmanaged.
///
/// Counts the wins recorded since the current day start (including the one
/// just recorded); when the cadence divides that count and no PSA is
/// playing, stamps the least-recently-played PSA and adds the synthetic
/// vote unless one is already pending.
pub fn apply_win_count_policy(show: &mut Show, frequency: i32, clock: &dyn Clock) {
    let Ok(frequency) = usize::try_from(frequency) else {
        return;
    };
    if frequency == 0 {
        return;
    }
    let day_start = clock.start_of_day();
    let wins_today = show
        .stats
        .voting_win
        .iter()
        .filter(|win| win.date_time > day_start)
        .count();
    if wins_today % frequency != 0 {
        return;
    }
    if show.psa_playing_now() {
        return;
    }
    let Some(index) = next_psa_index(show) else {
        return;
    };
    let now = clock.now();
    show.psa_sequences[index].last_played = now;
    let psa_name = show.psa_sequences[index].name.clone();
    if show.has_pending_psa_vote() {
        return;
    }
    let Some(sequence_name) = show.sequence_by_name(&psa_name).map(|s| s.name.clone()) else {
        return;
    };
    show.votes.push(synthetic_vote(&sequence_name, now));
    info!(show = %show.show_subdomain, psa = %sequence_name, "injected PSA vote after voting win");
}

