//! Show store database schema.

/// SQL to create the shows table.
///
/// The whole aggregate lives in one JSONB document per show; `version` is
/// the optimistic-concurrency token bumped on every save.
pub const CREATE_SHOWS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS shows (
    show_token VARCHAR(255) PRIMARY KEY,
    document   JSONB NOT NULL,
    version    BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
