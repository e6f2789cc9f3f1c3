//! Per-show operator preferences.

use serde::{Deserialize, Serialize};

/// How viewers interact with the show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerControlMode {
    /// Audience participation is off.
    #[default]
    Disabled,
    /// Viewers enqueue requests played strictly in order.
    Jukebox,
    /// Viewers vote; the highest tally plays next.
    Voting,
}

impl ViewerControlMode {
    /// Lowercase wire name, as reported to the plugin.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Jukebox => "jukebox",
            Self::Voting => "voting",
        }
    }
}

/// Operator preferences controlling participation and PSA rotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Current participation mode.
    pub viewer_control_mode: ViewerControlMode,
    /// Master switch for audience participation.
    pub viewer_control_enabled: bool,
    /// Whether PSA rotation is on at all.
    pub psa_enabled: bool,
    /// `true`: PSAs are injected from the play-count signal; `false`: from
    /// the voting win-count signal.
    pub manage_psa: bool,
    /// Cadence between automatic PSA insertions; must be positive for
    /// injection to fire.
    pub psa_frequency: i32,
    /// How many plays a just-played sequence stays hidden from selection.
    pub hide_sequence_count: u32,
    /// Whether winning a vote clears the remaining tallies.
    pub reset_votes: bool,
    /// Plays since the last PSA, the play-count cadence counter.
    pub sequences_played: i32,
}
