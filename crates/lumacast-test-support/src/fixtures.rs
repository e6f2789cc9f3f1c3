//! Show fixtures for engine and route tests.

use chrono::{DateTime, Utc};
use lumacast_core::token::ShowToken;
use lumacast_show::domain::participation::{Request, Vote, VoteTarget};
use lumacast_show::domain::preferences::{Preferences, ViewerControlMode};
use lumacast_show::domain::sequence::{PsaSequence, Sequence, SequenceGroup};
use lumacast_show::domain::show::Show;

/// A show with default preferences and no content, keyed by `token`.
#[must_use]
pub fn base_show(token: &str) -> Show {
    Show {
        show_token: ShowToken::new(token),
        show_subdomain: format!("{token}-subdomain"),
        playing_now: None,
        playing_next: None,
        playing_next_from_schedule: None,
        plugin_version: None,
        fpp_version: None,
        sequences: Vec::new(),
        sequence_groups: Vec::new(),
        psa_sequences: Vec::new(),
        votes: Vec::new(),
        requests: Vec::new(),
        preferences: Some(Preferences {
            viewer_control_enabled: true,
            ..Preferences::default()
        }),
        stats: lumacast_show::domain::show::ShowStats::default(),
        version: 0,
    }
}

/// An active ungrouped sequence at the given order, indexed to match.
#[must_use]
pub fn sequence(name: &str, order: i32) -> Sequence {
    Sequence {
        name: name.to_owned(),
        display_name: name.to_owned(),
        index: Some(order),
        order,
        active: true,
        ..Sequence::default()
    }
}

/// An active sequence belonging to `group`.
#[must_use]
pub fn grouped_sequence(name: &str, group: &str, order: i32) -> Sequence {
    Sequence {
        group: Some(group.to_owned()),
        ..sequence(name, order)
    }
}

/// A sequence group with no cooldown.
#[must_use]
pub fn group(name: &str) -> SequenceGroup {
    SequenceGroup {
        name: name.to_owned(),
        visibility_count: 0,
    }
}

/// A PSA rotation entry.
#[must_use]
pub fn psa(name: &str, last_played: DateTime<Utc>, order: i32) -> PsaSequence {
    PsaSequence {
        name: name.to_owned(),
        last_played,
        order,
    }
}

/// A vote for a single sequence.
#[must_use]
pub fn vote(sequence_name: &str, votes: i32, last_vote_time: DateTime<Utc>) -> Vote {
    Vote {
        target: VoteTarget::Sequence(sequence_name.to_owned()),
        votes,
        last_vote_time,
        owner_voted: false,
        viewers_voted: Vec::new(),
    }
}

/// A vote for a whole group.
#[must_use]
pub fn group_vote(group_name: &str, votes: i32, last_vote_time: DateTime<Utc>) -> Vote {
    Vote {
        target: VoteTarget::Group(group_name.to_owned()),
        ..vote("", votes, last_vote_time)
    }
}

/// A jukebox request at the given queue position.
#[must_use]
pub fn request(sequence_name: &str, position: i32) -> Request {
    Request {
        sequence_name: sequence_name.to_owned(),
        position,
        owner_requested: false,
        viewer_requested: None,
    }
}

/// Preferences tuned for PSA-rotation tests: PSAs enabled and managed from
/// the play-count signal at the given cadence.
#[must_use]
pub fn managed_psa_preferences(mode: ViewerControlMode, frequency: i32) -> Preferences {
    Preferences {
        viewer_control_mode: mode,
        viewer_control_enabled: true,
        psa_enabled: true,
        manage_psa: true,
        psa_frequency: frequency,
        ..Preferences::default()
    }
}
