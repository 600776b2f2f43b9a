//! Dexview: a paginated creature catalog viewer backed by PokeAPI.
//!
//! Dexview provides:
//! - A paginated listing (20 per page) where every entry is enriched with its details
//! - Client-side search, attribute filters, and sort order over the shown records
//! - A detail view with attributes and an image gallery
//! - A favorites collection persisted across sessions
//! - Background fetching with bounded concurrency and cancellation of superseded requests

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (host.rs)                                     │  ← Runs actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage       │   │ Worker        │
//! │ (catalog/)    │   │ (storage/)    │   │ (worker/)     │
//! │ - Pagination  │   │ - Key-value   │   │ - Page loads  │
//! │ - Projection  │   │ - JSON file   │   │ - Enrichment  │
//! │ - Favorites   │   │ - Favorites   │   │ - Details     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ API (api/)    │
//!                                         │ - reqwest     │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Web-service DTOs and the HTTP client
//! - [`catalog`]: Catalog session, pagination, favorites, list projection
//! - [`domain`]: Core record types and errors
//! - [`host`]: Action execution and fetch task management
//! - [`infrastructure`]: Data and config directory resolution
//! - [`storage`]: Key-value stores and the favorites repository
//! - [`worker`]: Fetch messages and the fetch worker
//! - [`ui`]: View models and text rendering
//! - [`observability`]: OpenTelemetry span export to a JSON-lines file
//!
//! # Configuration
//!
//! Settings are layered: built-in defaults, then `<config_dir>/config.toml`,
//! then `DEXVIEW_*` environment variables.
//!
//! ```toml
//! # ~/.config/dexview/config.toml
//! base_url = "https://pokeapi.co/api/v2"
//! request_timeout_secs = 10
//! enrich_concurrency = 8
//! data_dir = "~/.local/share/dexview"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use dexview::app::{handle_event, AppState, Event};
//! use dexview::catalog::CatalogSession;
//! use dexview::storage::{MemoryStore, StoredFavorites};
//!
//! let session = CatalogSession::new(Box::new(StoredFavorites::new(MemoryStore::new())));
//! let mut state = AppState::new(session);
//! let (_changed, _actions) = handle_event(&mut state, &Event::Start)?;
//! // Execute actions, or hand them to a `Host`...
//! # Ok::<(), dexview::DexError>(())
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod host;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, View};
pub use domain::{DexError, Record, RecordDetails, Result};
pub use host::Host;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default web-service root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Name of the favorites store inside the data directory.
pub const STORE_FILE_NAME: &str = "favorites.json";

/// Prefix of environment variables read by [`ConfigLayer::from_env`].
pub const ENV_PREFIX: &str = "DEXVIEW_";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Web-service root without trailing slash. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Maximum detail fetches in flight while enriching one page. Default: 8
    pub enrich_concurrency: usize,

    /// Directory for the favorites store and trace file.
    ///
    /// `None` selects the platform data directory. See
    /// [`infrastructure::data_dir`].
    pub data_dir: Option<String>,

    /// Tracing filter directive: `trace`, `debug`, `info`, `warn`, `error`.
    /// `None` means `"info"`. `RUST_LOG` takes precedence.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            enrich_concurrency: 8,
            data_dir: None,
            trace_level: None,
        }
    }
}

/// One configuration source. Unset fields leave the lower layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub enrich_concurrency: Option<usize>,
    pub data_dir: Option<String>,
    pub trace_level: Option<String>,
}

impl ConfigLayer {
    /// Parses string pairs. Empty values and unparsable numbers are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dexview::ConfigLayer;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("enrich_concurrency".to_string(), "4".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let layer = ConfigLayer::from_map(&map);
    /// assert_eq!(layer.enrich_concurrency, Some(4));
    /// assert_eq!(layer.request_timeout_secs, None);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            base_url: text("base_url"),
            request_timeout_secs: text("request_timeout_secs").and_then(|v| v.parse().ok()),
            enrich_concurrency: text("enrich_concurrency").and_then(|v| v.parse().ok()),
            data_dir: text("data_dir"),
            trace_level: text("trace_level"),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| DexError::Config(e.to_string()))
    }

    /// Reads `DEXVIEW_*` variables, e.g. `DEXVIEW_BASE_URL` for `base_url`.
    #[must_use]
    pub fn from_env() -> Self {
        let map: BTreeMap<String, String> = std::env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }
}

impl Config {
    /// Applies `layer` on top of `self`; fields set in `layer` win.
    #[must_use]
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(base_url) = layer.base_url {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = layer.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(concurrency) = layer.enrich_concurrency {
            self.enrich_concurrency = concurrency;
        }
        if layer.data_dir.is_some() {
            self.data_dir = layer.data_dir;
        }
        if layer.trace_level.is_some() {
            self.trace_level = layer.trace_level;
        }
        self
    }

    /// Defaults overlaid with string pairs.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge(ConfigLayer::from_map(map))
    }

    /// Defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Self::default().merge(ConfigLayer::from_toml_str(source)?))
    }

    /// Defaults, then the config file at `path` if it exists, then the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        if path.exists() {
            let source = std::fs::read_to_string(path)?;
            config = config.merge(ConfigLayer::from_toml_str(&source)?);
        }
        Ok(config.merge(ConfigLayer::from_env()))
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds a ready-to-run [`Host`] from configuration.
///
/// Opens the favorites store in the data directory, loads favorites once, and
/// creates the HTTP client and fetch worker. Tracing is not initialized here;
/// see [`observability::init_tracing`].
///
/// An unusable data directory is not fatal: favorites are then kept in memory
/// for this run only.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<Host> {
    tracing::debug!(base_url = %config.base_url, "initializing dexview");

    let session = catalog::CatalogSession::new(open_favorites(config));

    let client = api::PokeApiClient::new(&config.base_url, config.request_timeout())?;
    let worker = worker::FetchWorker::new(Arc::new(client), config.enrich_concurrency);

    Ok(Host::new(AppState::new(session), worker))
}

fn open_favorites(config: &Config) -> Box<dyn storage::FavoritesRepository> {
    let store_path = infrastructure::data_dir(config).join(STORE_FILE_NAME);
    match storage::JsonFileStore::open(store_path) {
        Ok(store) => Box::new(storage::StoredFavorites::new(store)),
        Err(e) => {
            tracing::warn!(error = %e, "favorites store unavailable, keeping favorites in memory");
            Box::new(storage::StoredFavorites::new(storage::MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn later_layer_wins() {
        let file = ConfigLayer::from_toml_str(
            "base_url = \"http://localhost:8000/api/v2/\"\nenrich_concurrency = 2\n",
        )
        .unwrap();
        let mut map = BTreeMap::new();
        map.insert("enrich_concurrency".to_string(), "6".to_string());
        map.insert("trace_level".to_string(), String::new());

        let config = Config::default()
            .merge(file)
            .merge(ConfigLayer::from_map(&map));

        assert_eq!(config.base_url, "http://localhost:8000/api/v2");
        assert_eq!(config.enrich_concurrency, 6);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        let err = Config::from_toml_str("page_size = 50").unwrap_err();
        assert!(matches!(err, DexError::Config(_)));
    }

    fn config_in(dir: &Path) -> Config {
        Config {
            data_dir: Some(dir.display().to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn undecodable_store_starts_without_favorites() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(STORE_FILE_NAME), [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let host = initialize(&config_in(dir.path())).unwrap();
        assert!(host.state().session.favorites().is_empty());
    }

    #[test]
    fn unusable_data_dir_keeps_favorites_in_memory() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut host = initialize(&config_in(&blocker.join("data"))).unwrap();
        let record = Record::new(25, "pikachu", "pikachu");
        host.dispatch(&Event::ToggleFavorite(record)).unwrap();

        assert!(host.state().session.is_favorite(25));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, Config::default().request_timeout_secs);
    }
}
