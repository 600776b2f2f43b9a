//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for everything on screen: the
//! catalog session (pages and favorites), the active view, the list query, the
//! cursor, and the detail-view state. The view model is derived from it on
//! demand and never stored.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::AppState;
//! use dexview::catalog::CatalogSession;
//! use dexview::storage::{MemoryStore, StoredFavorites};
//!
//! let session = CatalogSession::new(Box::new(StoredFavorites::new(MemoryStore::new())));
//! let state = AppState::new(session);
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.header.nav.len(), 2);
//! ```

use super::modes::{DetailPhase, DetailState, View};
use crate::catalog::{CatalogSession, FilterField, FilterOptions, ListQuery, SortOrder};
use crate::domain::{ImageSlot, Record, RecordDetails};
use crate::ui::helpers::{capitalize, format_tenths};
use crate::ui::viewmodel::{
    AttributeRow, Body, CardItem, DetailsPanel, DetailsView, EmptyState, FilterBarInfo,
    FilterSelect, FooterInfo, GalleryItem, GridView, HeaderInfo, ImageSource, NavEntry, PagerInfo,
    UIViewModel,
};
use crate::worker::FetchTicket;

/// Static message shown when a detail fetch fails.
pub const DETAILS_ERROR_MESSAGE: &str =
    "Could not load the details for this Pokémon. Please try again.";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Pages, pagination, and favorites.
    pub session: CatalogSession,

    /// Active screen.
    pub view: View,

    /// Search, filters, and order. Shared by the list and favorites views and
    /// kept across view switches.
    pub query: ListQuery,

    /// Cursor within the visible cards of the list or favorites view.
    ///
    /// Clamped by `clamp_selection()`. Wraps during navigation.
    pub selected_index: usize,

    /// Present while the detail view is active.
    pub details: Option<DetailState>,

    /// Last ticket handed out.
    last_ticket: FetchTicket,
}

impl AppState {
    #[must_use]
    pub fn new(session: CatalogSession) -> Self {
        Self {
            session,
            view: View::List,
            query: ListQuery::default(),
            selected_index: 0,
            details: None,
            last_ticket: FetchTicket::new(0),
        }
    }

    /// Hands out a fresh ticket, strictly greater than all previous ones.
    pub fn issue_ticket(&mut self) -> FetchTicket {
        self.last_ticket = self.last_ticket.next();
        self.last_ticket
    }

    /// Records shown by the list or favorites view after the query is applied.
    ///
    /// Empty in the detail view.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&Record> {
        match self.view {
            View::List => self.query.apply(self.session.records()),
            View::Favorites => self.query.apply(self.session.favorites().as_slice()),
            View::Details => Vec::new(),
        }
    }

    /// Record under the cursor, if any card is visible.
    #[must_use]
    pub fn selected_record(&self) -> Option<Record> {
        self.visible_records().get(self.selected_index).map(|r| (*r).clone())
    }

    /// Moves the cursor down by one card, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_records().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up by one card, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_records().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the cursor inside the visible cards after the set changes.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_records().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", view = ?self.view).entered();

        let body = match (&self.view, &self.details) {
            (View::Details, Some(detail)) => Body::Details(self.compute_details(detail)),
            _ => Body::Grid(self.compute_grid()),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let favorites_count = self.session.favorites().len();
        // The detail view keeps the tab it was opened from highlighted.
        let active = match (&self.view, &self.details) {
            (View::Details, Some(detail)) => detail.return_to,
            (view, _) => *view,
        };

        HeaderInfo {
            title: "Pokédex".to_string(),
            nav: vec![
                NavEntry {
                    label: "Pokémon List".to_string(),
                    active: active == View::List,
                },
                NavEntry {
                    label: format!("My Favorites ({favorites_count})"),
                    active: active == View::Favorites,
                },
            ],
        }
    }

    fn compute_grid(&self) -> GridView {
        let (heading, source): (&str, &[Record]) = match self.view {
            View::Favorites => ("My Favorites", self.session.favorites().as_slice()),
            _ => ("Pokémon List", self.session.records()),
        };

        let visible = self.query.apply(source);
        let cards: Vec<CardItem> = visible
            .iter()
            .enumerate()
            .map(|(index, record)| CardItem {
                id: record.id,
                name: capitalize(&record.name),
                image: ImageSource::card(record),
                is_favorite: self.session.is_favorite(record.id),
                is_selected: index == self.selected_index,
                highlight_ranges: self.query.highlight_ranges(&record.name),
            })
            .collect();

        let is_list = self.view == View::List;
        let loading = is_list && self.session.is_loading();

        let empty_state = if cards.is_empty() && !loading {
            Some(self.compute_empty_state(source.is_empty()))
        } else {
            None
        };

        let notice = if is_list {
            self.session
                .failure()
                .map(|failure| format!("Could not load page {}.", failure.page))
        } else {
            None
        };

        GridView {
            heading: heading.to_string(),
            filter_bar: self.compute_filter_bar(source),
            cards,
            empty_state,
            pager: if is_list { self.compute_pager() } else { None },
            notice,
            loading,
        }
    }

    fn compute_empty_state(&self, source_empty: bool) -> EmptyState {
        let subtitle = if self.view == View::Favorites && source_empty {
            "Mark a Pokémon with * to add it here."
        } else if self.query.is_filtering() {
            "Try a different search or clear the filters."
        } else {
            ""
        };

        EmptyState {
            message: "No Pokémon found.".to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_filter_bar(&self, source: &[Record]) -> FilterBarInfo {
        let options = FilterOptions::scan(source);
        let filters = [FilterField::Ability, FilterField::Type, FilterField::Species]
            .into_iter()
            .map(|field| {
                let selected = self.query.filter(field);
                FilterSelect {
                    field,
                    any_label: field.any_label().to_string(),
                    selected: (!selected.is_empty()).then(|| selected.to_string()),
                    options: options.for_field(field).to_vec(),
                }
            })
            .collect();

        FilterBarInfo {
            search: self.query.search.clone(),
            filters,
            order: self.query.order,
            order_options: SortOrder::ALL.to_vec(),
        }
    }

    /// Pager for the list view; only shown once there is more than one page.
    fn compute_pager(&self) -> Option<PagerInfo> {
        let pagination = self.session.pagination();
        if pagination.total_pages <= 1 {
            return None;
        }

        Some(PagerInfo {
            current: pagination.current,
            total: pagination.total_pages,
            prev_enabled: self.session.prev_target().is_some(),
            next_enabled: self.session.next_target().is_some(),
        })
    }

    fn compute_details(&self, detail: &DetailState) -> DetailsView {
        let subject = &detail.subject;
        let is_favorite = self.session.is_favorite(subject.id);

        match &detail.phase {
            DetailPhase::Idle | DetailPhase::Loading { .. } => DetailsView::Loading {
                name: capitalize(&subject.name),
            },
            DetailPhase::Errored => DetailsView::Failed {
                message: DETAILS_ERROR_MESSAGE.to_string(),
                back_label: "Back to list".to_string(),
            },
            DetailPhase::Loaded(details) => {
                DetailsView::Loaded(Box::new(Self::compute_panel(details, is_favorite)))
            }
        }
    }

    fn compute_panel(details: &RecordDetails, is_favorite: bool) -> DetailsPanel {
        let base_experience = details
            .base_experience
            .map_or_else(|| "unknown".to_string(), |xp| xp.to_string());

        let attributes = vec![
            AttributeRow::new("Height", format!("{} m", format_tenths(details.height))),
            AttributeRow::new("Weight", format!("{} kg", format_tenths(details.weight))),
            AttributeRow::new("Base Experience", base_experience),
            AttributeRow::new("Abilities", details.abilities.join(", ")),
            AttributeRow::new("Types", details.types.join(", ")),
            AttributeRow::new("Species", details.species.clone()),
            AttributeRow::new("Order", details.order.to_string()),
        ];

        let gallery = details
            .sprites
            .present()
            .map(|(slot, src): (ImageSlot, &str)| GalleryItem {
                label: slot.label().to_string(),
                image: ImageSource::gallery(src),
            })
            .collect();

        DetailsPanel {
            id: details.id,
            name: capitalize(&details.name),
            is_favorite,
            portrait: ImageSource::portrait(&details.summary()),
            attributes,
            gallery,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view {
            View::List => "j/k: move  o: open  *: favorite  n/p: page  r: reload  /term: search  f: favorites  q: quit",
            View::Favorites => "j/k: move  o: open  *: favorite  /term: search  l: list  q: quit",
            View::Details => "*: favorite  b: back  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
