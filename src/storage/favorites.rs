//! Favorites repository over a key-value store.

use crate::catalog::Favorites;
use crate::domain::error::{DexError, Result};
use crate::storage::backend::KeyValueStore;

/// Key under which the favorites array is persisted.
pub const FAVORITES_KEY: &str = "pokemonFavorites";

/// Load-once, save-on-every-change persistence for the favorites collection.
pub trait FavoritesRepository: Send {
    /// Reads the persisted collection.
    ///
    /// Never fails: missing, unreadable, or corrupt content yields an empty
    /// collection.
    fn load(&self) -> Favorites;

    /// Overwrites the persisted collection with `favorites`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn save(&mut self, favorites: &Favorites) -> Result<()>;
}

/// [`FavoritesRepository`] storing a JSON array under [`FAVORITES_KEY`].
#[derive(Debug)]
pub struct StoredFavorites<S> {
    store: S,
}

impl<S: KeyValueStore> StoredFavorites<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives back the wrapped store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> FavoritesRepository for StoredFavorites<S> {
    fn load(&self) -> Favorites {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted favorites");
                return Favorites::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                return Favorites::new();
            }
        };

        match serde_json::from_str::<Favorites>(&raw) {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "favorites loaded");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted favorites are corrupt, starting empty");
                Favorites::new()
            }
        }
    }

    fn save(&mut self, favorites: &Favorites) -> Result<()> {
        let json = serde_json::to_string(favorites)
            .map_err(|e| DexError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, json)?;
        tracing::debug!(count = favorites.len(), "favorites saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use crate::storage::{JsonFileStore, MemoryStore};
    use std::collections::BTreeSet;

    #[test]
    fn round_trip_preserves_identifiers() {
        let mut favorites = Favorites::new();
        favorites.toggle(&Record::new(25, "pikachu", "pikachu").with_image("p.png"));
        favorites.toggle(&Record::new(1, "bulbasaur", "bulbasaur"));

        let store = MemoryStore::new();
        let mut repository = StoredFavorites::new(store.clone());
        repository.save(&favorites).unwrap();

        let reloaded = StoredFavorites::new(store).load();
        let expected: BTreeSet<u32> = favorites.iter().map(|r| r.id).collect();
        let actual: BTreeSet<u32> = reloaded.iter().map(|r| r.id).collect();
        assert_eq!(actual, expected);
        assert_eq!(reloaded, favorites);
    }

    #[test]
    fn missing_key_loads_empty() {
        assert!(StoredFavorites::new(MemoryStore::new()).load().is_empty());
    }

    #[test]
    fn corrupt_value_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{\"id\": oops".to_string()).unwrap();
        assert!(StoredFavorites::new(store).load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{\"id\": 25}".to_string()).unwrap();
        assert!(StoredFavorites::new(store).load().is_empty());
    }

    #[test]
    fn persisted_value_is_a_plain_array() {
        let store = MemoryStore::new();
        let mut repository = StoredFavorites::new(store.clone());
        let favorites: Favorites = vec![Record::new(4, "charmander", "charmander")].into();
        repository.save(&favorites).unwrap();

        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let favorites: Favorites = vec![Record::new(7, "squirtle", "squirtle")].into();

        let mut repository = StoredFavorites::new(JsonFileStore::open(path.clone()).unwrap());
        repository.save(&favorites).unwrap();
        drop(repository);

        let reloaded = StoredFavorites::new(JsonFileStore::open(path).unwrap()).load();
        assert_eq!(reloaded, favorites);
    }
}
