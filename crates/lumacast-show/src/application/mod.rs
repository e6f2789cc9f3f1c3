//! Application layer — the engines that mutate the show aggregate.
//!
//! Each public operation is one unit of work: load the aggregate by token,
//! apply exactly one engine's mutation, save the whole aggregate. Engines
//! share the aggregate's sub-collections but each owns a distinct mutation
//! path.

pub mod playback;
pub mod psa;
pub mod queue;
pub mod settings;
pub mod sync;
pub mod voting;

use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;

use crate::domain::show::Show;
use crate::store::ShowStore;

/// Resolves the token to its aggregate or the not-found failure.
pub(crate) async fn load_show(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<Show, ShowError> {
    store
        .find_by_token(token)
        .await?
        .ok_or(ShowError::ShowNotFound)
}
