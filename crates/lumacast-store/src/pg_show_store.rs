//! `PostgreSQL` implementation of the `ShowStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use lumacast_show::domain::show::Show;
use lumacast_show::store::ShowStore;

/// PostgreSQL-backed show store.
///
/// The aggregate is one JSONB document per row. Saves are a compare-and-set
/// on the `version` column: a row that moved since the load refuses the
/// write, so two operations racing on the same show can never silently drop
/// each other's sub-collection edits.
#[derive(Debug, Clone)]
pub struct PgShowStore {
    pool: PgPool,
}

impl PgShowStore {
    /// Creates a new `PgShowStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(err: impl std::fmt::Display) -> ShowError {
    ShowError::Infrastructure(err.to_string())
}

#[async_trait]
impl ShowStore for PgShowStore {
    async fn find_by_token(&self, token: &ShowToken) -> Result<Option<Show>, ShowError> {
        let row: Option<(serde_json::Value, i64)> =
            sqlx::query_as("SELECT document, version FROM shows WHERE show_token = $1")
                .bind(token.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure)?;

        let Some((document, version)) = row else {
            return Ok(None);
        };
        let mut show: Show = serde_json::from_value(document)
            .map_err(|e| ShowError::Infrastructure(format!("show document is corrupt: {e}")))?;
        show.version = version;
        Ok(Some(show))
    }

    async fn save(&self, show: &Show) -> Result<(), ShowError> {
        let document = serde_json::to_value(show).map_err(infrastructure)?;
        let result = sqlx::query(
            "UPDATE shows
             SET document = $1, version = version + 1, updated_at = NOW()
             WHERE show_token = $2 AND version = $3",
        )
        .bind(document)
        .bind(show.show_token.as_str())
        .bind(show.version)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            warn!(show = %show.show_subdomain, expected = show.version, "show save lost a version race");
            return Err(ShowError::ConcurrencyConflict {
                subdomain: show.show_subdomain.clone(),
                expected: show.version,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lumacast_test_support::fixtures;

    // The stored document must keep the wire shape the rest of the stack
    // reads: camelCase keys and no version field (the column owns it).
    #[test]
    fn test_document_shape_is_camel_case_without_the_version_column() {
        let mut show = fixtures::base_show("tok");
        show.version = 41;
        show.psa_sequences = vec![fixtures::psa(
            "psa-1",
            Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap(),
            1,
        )];
        show.sequences = vec![fixtures::grouped_sequence("member", "classics", 2)];

        let document = serde_json::to_value(&show).unwrap();

        assert_eq!(document["showToken"], "tok");
        assert_eq!(document["showSubdomain"], "tok-subdomain");
        assert!(document.get("version").is_none());
        assert_eq!(document["psaSequences"][0]["lastPlayed"], "2026-03-09T00:00:00Z");
        assert_eq!(document["sequences"][0]["type"], "SEQUENCE");
        assert_eq!(
            document["preferences"]["viewerControlMode"],
            "disabled"
        );
    }

    #[test]
    fn test_documents_missing_optional_collections_still_load() {
        let raw = serde_json::json!({
            "showToken": "tok",
            "showSubdomain": "demo",
        });

        let show: lumacast_show::domain::show::Show = serde_json::from_value(raw).unwrap();

        assert!(show.sequences.is_empty());
        assert!(show.votes.is_empty());
        assert!(show.preferences.is_none());
        assert_eq!(show.version, 0);
    }
}
