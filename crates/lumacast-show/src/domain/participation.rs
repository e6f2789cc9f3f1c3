//! Audience participation records: votes and jukebox requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a vote is for: a single sequence or a whole sequence group.
///
/// A closed variant rather than two nullable references, so "exactly one of
/// sequence/group is set" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum VoteTarget {
    /// Vote for one sequence, by name.
    Sequence(String),
    /// Vote for a whole group, by group name.
    Group(String),
}

impl VoteTarget {
    /// The sequence name, when this vote targets a single sequence.
    #[must_use]
    pub fn sequence_name(&self) -> Option<&str> {
        match self {
            Self::Sequence(name) => Some(name),
            Self::Group(_) => None,
        }
    }
}

/// A voting-mode tally entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// The sequence or group being voted for.
    pub target: VoteTarget,
    /// Accumulated weight. Synthetic injected votes sit far above any
    /// organic tally.
    pub votes: i32,
    /// When the most recent ballot landed; the earlier time wins a count
    /// tie.
    pub last_vote_time: DateTime<Utc>,
    /// Whether the show owner cast one of the ballots.
    #[serde(default)]
    pub owner_voted: bool,
    /// Viewers who voted since the last playback update; cleared on every
    /// `updateWhatsPlaying`.
    #[serde(default)]
    pub viewers_voted: Vec<String>,
}

/// A jukebox-mode queue entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Name of the requested sequence.
    pub sequence_name: String,
    /// Queue ordering; lower plays sooner.
    pub position: i32,
    /// Whether the show owner placed the request.
    #[serde(default)]
    pub owner_requested: bool,
    /// Viewer attribution for the current playback window; cleared on every
    /// `updateWhatsPlaying`.
    #[serde(default)]
    pub viewer_requested: Option<String>,
}
