//! Playable sequences, sequence groups, and PSA rotation entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playable show segment, as reconciled from the uploaded playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sequence {
    /// Unique key among currently active sequences.
    pub name: String,
    /// Name shown to viewers; defaults to `name` on creation.
    pub display_name: String,
    /// Reported duration in seconds, when the playlist carries one.
    pub duration: Option<i32>,
    /// Position inside the controller's playlist; `None` once inactive.
    pub index: Option<i32>,
    /// Display/ordering rank. Active sequences sort below the playlist
    /// length, inactive ones above it.
    pub order: i32,
    /// Whether the sequence appeared in the most recent playlist sync.
    pub active: bool,
    /// Cooldown counter hiding the sequence from selection until it decays
    /// to zero.
    pub visibility_count: u32,
    /// Group this sequence belongs to, when any.
    pub group: Option<String>,
    /// Content kind reported by the controller.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_name: String::new(),
            duration: None,
            index: None,
            order: 0,
            active: false,
            visibility_count: 0,
            group: None,
            kind: DEFAULT_SEQUENCE_KIND.to_owned(),
        }
    }
}

/// Kind assigned to sequences whose playlist entry carries none.
pub const DEFAULT_SEQUENCE_KIND: &str = "SEQUENCE";

impl Sequence {
    /// Whether this sequence belongs to a named group.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.group.as_deref().is_some_and(|g| !g.is_empty())
    }
}

/// A named bucket of sequences voted and requested as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequenceGroup {
    /// Group name, matched against `Sequence::group`.
    pub name: String,
    /// Cooldown counter, shared by all member sequences.
    pub visibility_count: u32,
}

/// A sequence reserved for periodic automatic insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsaSequence {
    /// Name of the underlying sequence.
    pub name: String,
    /// When this PSA was last injected; drives least-recently-played
    /// selection.
    pub last_played: DateTime<Utc>,
    /// Configured rotation order, the tie-break after `last_played`.
    pub order: i32,
}
