//! Catalog session: the data owner behind the list and favorites views.
//!
//! The session tracks which page is shown and which page is being fetched, holds
//! the enriched records of the last successful load, and owns the favorites
//! collection together with its repository. It performs no I/O besides
//! favorites persistence. Page fetches are requested by the application layer
//! and their outcomes are fed back through [`CatalogSession::apply_page`] and
//! [`CatalogSession::fail_page`].

use crate::catalog::favorites::Favorites;
use crate::catalog::pagination::Pagination;
use crate::domain::Record;
use crate::storage::FavoritesRepository;
use crate::worker::FetchTicket;
use serde::{Deserialize, Serialize};

/// An enriched listing page as produced by the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedPage {
    /// 1-based page number this window was requested for.
    pub page: u32,

    /// Total record count reported by the service.
    pub count: u32,

    /// Summary records in service order.
    pub records: Vec<Record>,
}

/// The page load currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPage {
    pub ticket: FetchTicket,
    pub page: u32,
}

/// Last page-load failure, shown as a notice until the next successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub message: String,
}

pub struct CatalogSession {
    pagination: Pagination,
    records: Vec<Record>,
    loaded_page: Option<u32>,
    pending: Option<PendingPage>,
    failure: Option<PageFailure>,
    favorites: Favorites,
    repository: Box<dyn FavoritesRepository>,
}

impl CatalogSession {
    /// Creates a session and loads favorites from `repository` exactly once.
    #[must_use]
    pub fn new(repository: Box<dyn FavoritesRepository>) -> Self {
        let favorites = repository.load();
        tracing::debug!(favorites = favorites.len(), "catalog session created");

        Self {
            pagination: Pagination::default(),
            records: Vec::new(),
            loaded_page: None,
            pending: None,
            failure: None,
            favorites,
            repository,
        }
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Records of the last successfully loaded page.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub const fn loaded_page(&self) -> Option<u32> {
        self.loaded_page
    }

    #[must_use]
    pub const fn pending(&self) -> Option<PendingPage> {
        self.pending
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&PageFailure> {
        self.failure.as_ref()
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(id)
    }

    /// Target of "next page", relative to the page shown or pending.
    #[must_use]
    pub const fn next_target(&self) -> Option<u32> {
        self.pagination.next_after(self.pagination.current)
    }

    /// Target of "previous page", relative to the page shown or pending.
    #[must_use]
    pub const fn prev_target(&self) -> Option<u32> {
        self.pagination.prev_before(self.pagination.current)
    }

    /// Marks `page` as the pending load identified by `ticket`.
    ///
    /// Returns `false` without touching state if `page` is out of range. A
    /// previously pending load is superseded; its result will be discarded.
    pub fn begin_page(&mut self, page: u32, ticket: FetchTicket) -> bool {
        if !self.pagination.contains(page) {
            tracing::debug!(page, total_pages = self.pagination.total_pages, "page out of range");
            return false;
        }

        if let Some(previous) = self.pending {
            tracing::debug!(superseded = %previous.ticket, page = previous.page, "superseding page load");
        }

        self.pagination.current = page;
        self.pending = Some(PendingPage { ticket, page });
        true
    }

    /// Installs a loaded page if `ticket` is the pending one.
    ///
    /// Returns `false` for stale results, which are dropped.
    pub fn apply_page(&mut self, ticket: FetchTicket, loaded: LoadedPage) -> bool {
        if !self.is_pending(ticket) {
            tracing::debug!(ticket = %ticket, page = loaded.page, "discarding stale page");
            return false;
        }

        tracing::debug!(page = loaded.page, count = loaded.count, records = loaded.records.len(), "page loaded");

        self.pagination.set_total_from_count(loaded.count);
        self.pagination.current = loaded.page;
        self.loaded_page = Some(loaded.page);
        self.records = loaded.records;
        self.pending = None;
        self.failure = None;
        true
    }

    /// Records a failed load if `ticket` is the pending one.
    ///
    /// The previously shown records stay, and the current page reverts to the
    /// page they belong to. Returns `false` for stale failures.
    pub fn fail_page(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        let Some(pending) = self.pending.filter(|p| p.ticket == ticket) else {
            tracing::debug!(ticket = %ticket, "discarding stale page failure");
            return false;
        };

        let message = message.into();
        tracing::warn!(page = pending.page, error = %message, "page load failed");

        self.pagination.current = self.loaded_page.unwrap_or(1);
        self.pending = None;
        self.failure = Some(PageFailure {
            page: pending.page,
            message,
        });
        true
    }

    /// Adds or removes `record` by identifier, then persists the whole collection.
    ///
    /// A failed write is logged; the in-memory collection stays updated. Returns
    /// whether the record is a favorite afterwards.
    pub fn toggle_favorite(&mut self, record: &Record) -> bool {
        let is_favorite = self.favorites.toggle(record);
        tracing::debug!(id = record.id, is_favorite, "favorite toggled");

        if let Err(e) = self.repository.save(&self.favorites) {
            tracing::error!(error = %e, "failed to persist favorites");
        }

        is_favorite
    }

    fn is_pending(&self, ticket: FetchTicket) -> bool {
        self.pending.is_some_and(|p| p.ticket == ticket)
    }
}

impl std::fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSession")
            .field("pagination", &self.pagination)
            .field("records", &self.records.len())
            .field("loaded_page", &self.loaded_page)
            .field("pending", &self.pending)
            .field("failure", &self.failure)
            .field("favorites", &self.favorites.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{DexError, Result};
    use crate::storage::{MemoryStore, StoredFavorites};
    use pretty_assertions::assert_eq;

    struct FailingRepository;

    impl FavoritesRepository for FailingRepository {
        fn load(&self) -> Favorites {
            Favorites::new()
        }

        fn save(&mut self, _favorites: &Favorites) -> Result<()> {
            Err(DexError::Storage("read-only".into()))
        }
    }

    fn session() -> CatalogSession {
        CatalogSession::new(Box::new(StoredFavorites::new(MemoryStore::new())))
    }

    fn page(page: u32, count: u32, first_id: u32) -> LoadedPage {
        LoadedPage {
            page,
            count,
            records: (first_id..first_id + 3)
                .map(|id| Record::new(id, format!("mon-{id}"), "x"))
                .collect(),
        }
    }

    fn loaded_at(page_no: u32, total_count: u32) -> CatalogSession {
        let mut session = session();
        // Reach the requested page through valid transitions.
        assert!(session.begin_page(1, FetchTicket::new(1)));
        assert!(session.apply_page(FetchTicket::new(1), page(1, total_count, 1)));
        if page_no != 1 {
            assert!(session.begin_page(page_no, FetchTicket::new(2)));
            assert!(session.apply_page(FetchTicket::new(2), page(page_no, total_count, 100)));
        }
        session
    }

    #[test]
    fn applying_a_page_sets_total_pages() {
        let session = loaded_at(1, 1302);
        assert_eq!(session.pagination().total_pages, 66);
        assert_eq!(session.records().len(), 3);
        assert!(!session.is_loading());
    }

    #[test]
    fn prev_on_first_page_is_a_no_op() {
        let session = loaded_at(1, 1302);
        assert_eq!(session.prev_target(), None);
    }

    #[test]
    fn next_on_last_page_is_a_no_op() {
        let mut session = loaded_at(66, 1302);
        assert_eq!(session.next_target(), None);
        assert!(!session.begin_page(67, FetchTicket::new(9)));
        assert_eq!(session.pagination().current, 66);
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut session = loaded_at(1, 100);
        assert!(session.begin_page(2, FetchTicket::new(10)));
        assert!(session.begin_page(3, FetchTicket::new(11)));

        assert!(!session.apply_page(FetchTicket::new(10), page(2, 100, 50)));
        assert_eq!(session.loaded_page(), Some(1));

        assert!(session.apply_page(FetchTicket::new(11), page(3, 100, 60)));
        assert_eq!(session.loaded_page(), Some(3));
        assert_eq!(session.records()[0].id, 60);
    }

    #[test]
    fn failure_keeps_records_and_reverts_page() {
        let mut session = loaded_at(1, 100);
        let before = session.records().to_vec();

        assert!(session.begin_page(2, FetchTicket::new(5)));
        assert_eq!(session.pagination().current, 2);
        assert!(session.fail_page(FetchTicket::new(5), "timeout"));

        assert_eq!(session.records(), before.as_slice());
        assert_eq!(session.pagination().current, 1);
        assert_eq!(
            session.failure(),
            Some(&PageFailure {
                page: 2,
                message: "timeout".into()
            })
        );

        assert!(session.begin_page(2, FetchTicket::new(6)));
        assert!(session.apply_page(FetchTicket::new(6), page(2, 100, 20)));
        assert_eq!(session.failure(), None);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut session = loaded_at(1, 100);
        assert!(session.begin_page(2, FetchTicket::new(5)));
        assert!(!session.fail_page(FetchTicket::new(4), "late"));
        assert!(session.is_loading());
        assert_eq!(session.failure(), None);
    }

    #[test]
    fn favorites_persist_after_every_toggle() {
        let store = MemoryStore::new();
        let mut session = CatalogSession::new(Box::new(StoredFavorites::new(store.clone())));
        let pikachu = Record::new(25, "pikachu", "pikachu");

        assert!(session.toggle_favorite(&pikachu));
        assert!(StoredFavorites::new(store.clone()).load().contains(25));

        assert!(!session.toggle_favorite(&pikachu));
        assert!(StoredFavorites::new(store).load().is_empty());
    }

    #[test]
    fn favorites_are_loaded_at_construction() {
        let store = MemoryStore::new();
        let mut first = CatalogSession::new(Box::new(StoredFavorites::new(store.clone())));
        first.toggle_favorite(&Record::new(4, "charmander", "charmander"));

        let second = CatalogSession::new(Box::new(StoredFavorites::new(store)));
        assert!(second.is_favorite(4));
    }

    #[test]
    fn failed_save_keeps_memory_state() {
        let mut session = CatalogSession::new(Box::new(FailingRepository));
        assert!(session.toggle_favorite(&Record::new(1, "bulbasaur", "bulbasaur")));
        assert!(session.is_favorite(1));
    }
}
