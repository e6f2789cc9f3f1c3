//! The `Show` aggregate root.

use chrono::{DateTime, Utc};
use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use serde::{Deserialize, Serialize};

use super::participation::{Request, Vote};
use super::preferences::Preferences;
use super::same_name;
use super::sequence::{PsaSequence, Sequence, SequenceGroup};

/// One voting win, kept as append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingWin {
    /// Winning sequence or group name.
    pub name: String,
    /// When the win was recorded.
    pub date_time: DateTime<Utc>,
}

/// Aggregate-level statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowStats {
    /// Win history, newest last. The win-count PSA cadence counts the
    /// entries recorded since the current day start.
    pub voting_win: Vec<VotingWin>,
}

/// The per-tenant aggregate holding all sequence, queue, vote, and
/// preference state.
///
/// Every public operation is a read-modify-write against one `Show`; the
/// engines in `crate::application` own the mutation paths, this type owns
/// the invariant-preserving helpers they share.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// Opaque lookup key presented by the on-site plugin.
    pub show_token: ShowToken,
    /// Public subdomain, safe for responses and log fields.
    pub show_subdomain: String,
    /// Name reported by the most recent playback update.
    #[serde(default)]
    pub playing_now: Option<String>,
    /// Name the coordinator expects to play next.
    #[serde(default)]
    pub playing_next: Option<String>,
    /// Next name according to the controller's own schedule.
    #[serde(default)]
    pub playing_next_from_schedule: Option<String>,
    /// Plugin build reported by `pluginVersion`.
    #[serde(default)]
    pub plugin_version: Option<String>,
    /// Controller firmware reported by `pluginVersion`.
    #[serde(default)]
    pub fpp_version: Option<String>,
    #[serde(default)]
    pub sequences: Vec<Sequence>,
    #[serde(default)]
    pub sequence_groups: Vec<SequenceGroup>,
    /// Subset of playable content reserved for automatic insertion.
    #[serde(default)]
    pub psa_sequences: Vec<PsaSequence>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub requests: Vec<Request>,
    /// `None` models a malformed aggregate; operations that need
    /// preferences fail with [`ShowError::PreferencesMissing`].
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub stats: ShowStats,
    /// Store-managed optimistic-concurrency token; never part of the
    /// document body.
    #[serde(skip)]
    pub version: i64,
}

impl Show {
    /// Returns the preferences or the precondition failure.
    ///
    /// # Errors
    ///
    /// Returns `ShowError::PreferencesMissing` when the aggregate carries no
    /// preferences document.
    pub fn preferences(&self) -> Result<&Preferences, ShowError> {
        self.preferences.as_ref().ok_or(ShowError::PreferencesMissing)
    }

    /// Mutable variant of [`Show::preferences`].
    ///
    /// # Errors
    ///
    /// Returns `ShowError::PreferencesMissing` when the aggregate carries no
    /// preferences document.
    pub fn preferences_mut(&mut self) -> Result<&mut Preferences, ShowError> {
        self.preferences.as_mut().ok_or(ShowError::PreferencesMissing)
    }

    /// Looks up a sequence by name, case-insensitively.
    #[must_use]
    pub fn sequence_by_name(&self, name: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| same_name(&s.name, name))
    }

    /// Mutable variant of [`Show::sequence_by_name`].
    pub fn sequence_by_name_mut(&mut self, name: &str) -> Option<&mut Sequence> {
        self.sequences.iter_mut().find(|s| same_name(&s.name, name))
    }

    /// Looks up a sequence group by name, case-insensitively.
    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<&SequenceGroup> {
        self.sequence_groups.iter().find(|g| same_name(&g.name, name))
    }

    /// Mutable variant of [`Show::group_by_name`].
    pub fn group_by_name_mut(&mut self, name: &str) -> Option<&mut SequenceGroup> {
        self.sequence_groups
            .iter_mut()
            .find(|g| same_name(&g.name, name))
    }

    /// Member sequence names of a group, in stored order.
    #[must_use]
    pub fn group_member_names(&self, group_name: &str) -> Vec<String> {
        self.sequences
            .iter()
            .filter(|s| s.group.as_deref().is_some_and(|g| same_name(g, group_name)))
            .map(|s| s.name.clone())
            .collect()
    }

    /// Whether the given name is reserved for PSA rotation.
    #[must_use]
    pub fn is_psa(&self, name: &str) -> bool {
        self.psa_sequences.iter().any(|p| same_name(&p.name, name))
    }

    /// Whether the currently playing sequence is a PSA.
    #[must_use]
    pub fn psa_playing_now(&self) -> bool {
        self.playing_now
            .as_deref()
            .is_some_and(|now| self.is_psa(now))
    }

    /// Whether any pending vote already targets a PSA.
    #[must_use]
    pub fn has_pending_psa_vote(&self) -> bool {
        self.votes
            .iter()
            .filter_map(|v| v.target.sequence_name())
            .any(|name| self.is_psa(name))
    }

    /// Whether any pending request already targets a PSA.
    #[must_use]
    pub fn has_pending_psa_request(&self) -> bool {
        self.requests.iter().any(|r| self.is_psa(&r.sequence_name))
    }

    /// Decrements every positive visibility count by one, across sequences
    /// and groups. The floor at zero is the saturating subtraction.
    pub fn decay_visibility(&mut self) {
        for sequence in &mut self.sequences {
            sequence.visibility_count = sequence.visibility_count.saturating_sub(1);
        }
        for group in &mut self.sequence_groups {
            group.visibility_count = group.visibility_count.saturating_sub(1);
        }
    }

    /// Clears the transient viewer-attribution fields on all pending
    /// requests and votes.
    pub fn clear_viewer_attribution(&mut self) {
        for request in &mut self.requests {
            request.viewer_requested = None;
        }
        for vote in &mut self.votes {
            vote.viewers_voted.clear();
        }
    }

    /// Hides a just-dequeued sequence from selection: the group's counter
    /// when the sequence is grouped, its own otherwise. The `+ 1`
    /// compensates the decay that runs on the very next playback update.
    /// No-op when hiding is disabled (`hide_count == 0`).
    pub fn hide_after_play(&mut self, sequence_name: &str, hide_count: u32) {
        if hide_count == 0 {
            return;
        }
        let group_name = self
            .sequence_by_name(sequence_name)
            .filter(|s| s.is_grouped())
            .and_then(|s| s.group.clone());
        if let Some(group_name) = group_name {
            if let Some(group) = self.group_by_name_mut(&group_name) {
                group.visibility_count = hide_count + 1;
            }
        } else if let Some(sequence) = self.sequence_by_name_mut(sequence_name) {
            sequence.visibility_count = hide_count + 1;
        }
    }

    /// Appends one entry to the win history.
    pub fn record_win(&mut self, name: impl Into<String>, at: DateTime<Utc>) {
        self.stats.voting_win.push(VotingWin {
            name: name.into(),
            date_time: at,
        });
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lumacast_core::error::ShowError;
    use lumacast_test_support::fixtures;

    #[test]
    fn test_decay_visibility_floors_at_zero() {
        let mut show = fixtures::base_show("tok");
        show.sequences = vec![fixtures::sequence("alpha", 1), fixtures::sequence("beta", 2)];
        show.sequences[0].visibility_count = 2;
        show.sequence_groups = vec![fixtures::group("classics")];

        show.decay_visibility();
        assert_eq!(show.sequences[0].visibility_count, 1);
        assert_eq!(show.sequences[1].visibility_count, 0);
        assert_eq!(show.sequence_groups[0].visibility_count, 0);

        show.decay_visibility();
        show.decay_visibility();
        assert_eq!(show.sequences[0].visibility_count, 0);
    }

    #[test]
    fn test_hide_after_play_targets_the_group_for_grouped_sequences() {
        let mut show = fixtures::base_show("tok");
        show.sequences = vec![fixtures::grouped_sequence("member", "classics", 1)];
        show.sequence_groups = vec![fixtures::group("classics")];

        show.hide_after_play("member", 3);

        assert_eq!(show.sequence_groups[0].visibility_count, 4);
        assert_eq!(show.sequences[0].visibility_count, 0);
    }

    #[test]
    fn test_hide_after_play_targets_the_sequence_when_ungrouped() {
        let mut show = fixtures::base_show("tok");
        show.sequences = vec![fixtures::sequence("solo", 1)];

        show.hide_after_play("solo", 2);

        assert_eq!(show.sequences[0].visibility_count, 3);
    }

    #[test]
    fn test_hide_after_play_is_a_noop_when_hiding_disabled() {
        let mut show = fixtures::base_show("tok");
        show.sequences = vec![fixtures::sequence("solo", 1)];

        show.hide_after_play("solo", 0);

        assert_eq!(show.sequences[0].visibility_count, 0);
    }

    #[test]
    fn test_clear_viewer_attribution_strips_requests_and_votes() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 20, 0, 0).unwrap();
        let mut show = fixtures::base_show("tok");
        let mut request = fixtures::request("alpha", 1);
        request.viewer_requested = Some("viewer-7".to_owned());
        let mut vote = fixtures::vote("beta", 3, now);
        vote.viewers_voted = vec!["viewer-7".to_owned(), "viewer-9".to_owned()];
        show.requests = vec![request];
        show.votes = vec![vote];

        show.clear_viewer_attribution();

        assert!(show.requests[0].viewer_requested.is_none());
        assert!(show.votes[0].viewers_voted.is_empty());
    }

    #[test]
    fn test_name_lookups_are_case_insensitive() {
        let mut show = fixtures::base_show("tok");
        show.sequences = vec![fixtures::sequence("Winter Lights", 1)];
        show.psa_sequences = vec![fixtures::psa(
            "Safety Notice",
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            1,
        )];

        assert!(show.sequence_by_name("winter lights").is_some());
        assert!(show.is_psa("SAFETY NOTICE"));
    }

    #[test]
    fn test_preferences_accessor_reports_the_precondition_failure() {
        let mut show = fixtures::base_show("tok");
        show.preferences = None;

        match show.preferences() {
            Err(ShowError::PreferencesMissing) => {}
            other => panic!("expected PreferencesMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_pending_psa_checks_only_match_psa_names() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 20, 0, 0).unwrap();
        let mut show = fixtures::base_show("tok");
        show.psa_sequences = vec![fixtures::psa("psa-1", now, 1)];
        show.votes = vec![fixtures::vote("ordinary", 5, now)];
        show.requests = vec![fixtures::request("ordinary", 1)];

        assert!(!show.has_pending_psa_vote());
        assert!(!show.has_pending_psa_request());

        show.votes.push(fixtures::vote("psa-1", 2000, now));
        show.requests.push(fixtures::request("psa-1", 0));

        assert!(show.has_pending_psa_vote());
        assert!(show.has_pending_psa_request());
    }
}
