//! Shared application state.

use std::sync::Arc;

use lumacast_core::clock::Clock;
use lumacast_show::store::ShowStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Aggregate persistence.
    pub store: Arc<dyn ShowStore>,
    /// Time source for every engine that stamps the aggregate.
    pub clock: Arc<dyn Clock>,
    /// Maximum playlist length accepted by a sync.
    pub playlist_sync_limit: usize,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(store: Arc<dyn ShowStore>, clock: Arc<dyn Clock>, playlist_sync_limit: usize) -> Self {
        Self {
            store,
            clock,
            playlist_sync_limit,
        }
    }
}
