//! Error taxonomy for show operations.

use thiserror::Error;

/// Top-level error type for all show control-plane operations.
#[derive(Debug, Error)]
pub enum ShowError {
    /// The show token did not resolve to an aggregate.
    #[error("show not found")]
    ShowNotFound,

    /// The aggregate loaded but carries no preferences document.
    ///
    /// Treated as a hard validation failure: no partial mutation is
    /// performed.
    #[error("preferences not found")]
    PreferencesMissing,

    /// A validation error in an inbound request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Optimistic concurrency conflict: another writer saved the aggregate
    /// between our load and save.
    #[error("concurrency conflict on show {subdomain}: expected version {expected}")]
    ConcurrencyConflict {
        /// Public subdomain of the show that had the conflict.
        subdomain: String,
        /// The version our save expected to find.
        expected: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
