//! Test stores — in-memory `ShowStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use lumacast_show::domain::show::Show;
use lumacast_show::store::ShowStore;

/// An in-memory show store with the same optimistic-concurrency behavior as
/// the production store: loads hand out the stored version, saves succeed
/// only when that version is still current and then bump it.
#[derive(Debug, Default)]
pub struct InMemoryShowStore {
    shows: Mutex<HashMap<String, Show>>,
}

impl InMemoryShowStore {
    /// Creates a store seeded with the given shows, each at version 0.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_shows(shows: Vec<Show>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.shows.lock().unwrap();
            for show in shows {
                guard.insert(show.show_token.as_str().to_owned(), show);
            }
        }
        store
    }

    /// Returns a snapshot of the stored show for assertions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn get(&self, token: &ShowToken) -> Option<Show> {
        self.shows.lock().unwrap().get(token.as_str()).cloned()
    }
}

#[async_trait]
impl ShowStore for InMemoryShowStore {
    async fn find_by_token(&self, token: &ShowToken) -> Result<Option<Show>, ShowError> {
        Ok(self.shows.lock().unwrap().get(token.as_str()).cloned())
    }

    async fn save(&self, show: &Show) -> Result<(), ShowError> {
        let mut guard = self.shows.lock().unwrap();
        let key = show.show_token.as_str().to_owned();
        let current = guard.get(&key).map(|stored| stored.version);
        if current != Some(show.version) {
            return Err(ShowError::ConcurrencyConflict {
                subdomain: show.show_subdomain.clone(),
                expected: show.version,
            });
        }
        let mut stored = show.clone();
        stored.version += 1;
        guard.insert(key, stored);
        Ok(())
    }
}

/// A show store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingShowStore;

#[async_trait]
impl ShowStore for FailingShowStore {
    async fn find_by_token(&self, _token: &ShowToken) -> Result<Option<Show>, ShowError> {
        Err(ShowError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _show: &Show) -> Result<(), ShowError> {
        Err(ShowError::Infrastructure("connection refused".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_a_stale_save_loses_the_version_race() {
        let store = InMemoryShowStore::with_shows(vec![fixtures::base_show("tok")]);
        let token = ShowToken::new("tok");

        // Two operations load the same version of the aggregate.
        let mut first = store.find_by_token(&token).await.unwrap().unwrap();
        let mut second = store.find_by_token(&token).await.unwrap().unwrap();

        first.playing_now = Some("carol".to_owned());
        store.save(&first).await.unwrap();

        // The second writer must not silently clobber the first.
        second.votes.clear();
        match store.save(&second).await.unwrap_err() {
            ShowError::ConcurrencyConflict { expected, .. } => assert_eq!(expected, 0),
            other => panic!("expected ConcurrencyConflict, got {other:?}"),
        }
        let stored = store.get(&token).unwrap();
        assert_eq!(stored.playing_now.as_deref(), Some("carol"));
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_saving_an_unknown_show_is_rejected() {
        let store = InMemoryShowStore::default();
        let show = fixtures::base_show("tok");

        let result = store.save(&show).await;

        assert!(matches!(
            result.unwrap_err(),
            ShowError::ConcurrencyConflict { .. }
        ));
    }
}
