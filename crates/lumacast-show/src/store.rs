//! Show persistence abstraction.

use async_trait::async_trait;
use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;

use crate::domain::show::Show;

/// Repository trait for loading and saving the show aggregate.
///
/// One public operation is exactly one `find_by_token` followed by at most
/// one `save`. Implementations must write the whole document atomically and
/// must reject a save whose `version` no longer matches the stored row, so
/// two operations racing on the same show cannot silently drop each other's
/// sub-collection edits.
#[async_trait]
pub trait ShowStore: Send + Sync {
    /// Loads a show by its opaque token; `None` when the token resolves to
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `ShowError::Infrastructure` when the backing store fails.
    async fn find_by_token(&self, token: &ShowToken) -> Result<Option<Show>, ShowError>;

    /// Persists the whole aggregate under the optimistic version check.
    ///
    /// # Errors
    ///
    /// Returns `ShowError::ConcurrencyConflict` when the stored version has
    /// moved since this aggregate was loaded.
    async fn save(&self, show: &Show) -> Result<(), ShowError>;
}
