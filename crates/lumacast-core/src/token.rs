//! Opaque show-token key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The opaque per-show credential presented by the on-site plugin.
///
/// The token doubles as the aggregate lookup key and must never appear in
/// logs; `Debug` is redacted for that reason. Every operation receives the
/// token explicitly rather than reading shared per-request state.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowToken(String);

impl ShowToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw token for store lookups.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShowToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_reveals_the_raw_token() {
        let token = ShowToken::new("abcdef123456");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("abcdef123456"));
        assert_eq!(rendered, "ShowToken(***)");
    }

    #[test]
    fn test_round_trips_as_a_bare_json_string() {
        let token = ShowToken::new("tok-1");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"tok-1\"");
        let back: ShowToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
