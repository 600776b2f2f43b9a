//! Storage layer for persisted viewer state.
//!
//! The only persisted state is the favorites collection. It lives as a JSON
//! array under a single key of a host key-value store.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait and the in-memory implementation
//! - `json`: JSON file-backed store with atomic writes
//! - `favorites`: the favorites repository bound to [`FAVORITES_KEY`]

pub mod backend;
pub mod favorites;
pub mod json;

pub use backend::{KeyValueStore, MemoryStore};
pub use favorites::{FavoritesRepository, StoredFavorites, FAVORITES_KEY};
pub use json::JsonFileStore;
