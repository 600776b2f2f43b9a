//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and fetch
//! results, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the input loop or from finished fetch tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `CatalogSession` methods
//! 4. Actions are collected and returned for the host to execute
//!
//! # Event Types
//!
//! - **Paging**: `Start`, `NextPage`, `PrevPage`, `ReloadPage`
//! - **Navigation**: `ShowList`, `ShowFavorites`, `ShowDetails`, `Back`, cursor moves
//! - **Favorites**: `ToggleFavorite`, `ToggleSelectedFavorite`
//! - **Query**: `SetSearch`, `SetFilter`, `SetOrder`, `ClearFilters`
//! - **Worker**: `Fetched` with a typed [`FetchResponse`]
//!
//! # Example
//!
//! ```rust
//! use dexview::app::{handle_event, Action, AppState, Event};
//! use dexview::catalog::CatalogSession;
//! use dexview::storage::{MemoryStore, StoredFavorites};
//!
//! let session = CatalogSession::new(Box::new(StoredFavorites::new(MemoryStore::new())));
//! let mut state = AppState::new(session);
//! let (changed, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(changed);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), dexview::DexError>(())
//! ```

use super::modes::{DetailState, View};
use crate::app::{Action, AppState};
use crate::catalog::{FilterField, SortOrder};
use crate::domain::error::Result;
use crate::domain::Record;
use crate::worker::{FetchKind, FetchRequest, FetchResponse};

/// Events triggered by user input or fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Loads the first page if nothing is shown or loading yet.
    Start,
    /// Requests the page after the current one (list view only).
    NextPage,
    /// Requests the page before the current one (list view only).
    PrevPage,
    /// Fetches the current page again, e.g. after a failure.
    ReloadPage,

    /// Switches to the paginated list.
    ShowList,
    /// Switches to the favorites collection.
    ShowFavorites,
    /// Moves the card cursor down (wraps to top).
    CursorDown,
    /// Moves the card cursor up (wraps to bottom).
    CursorUp,
    /// Opens the detail view for the card under the cursor.
    OpenSelected,
    /// Opens the detail view for a given record.
    ShowDetails(Record),
    /// Leaves the detail view.
    Back,

    /// Toggles the record under the cursor, or the detail subject.
    ToggleSelectedFavorite,
    /// Toggles a given record.
    ToggleFavorite(Record),

    /// Replaces the search term.
    SetSearch(String),
    /// Replaces one attribute filter. An empty value clears it.
    SetFilter { field: FilterField, value: String },
    /// Replaces the sort order.
    SetOrder(SortOrder),
    /// Clears search and filters, keeping the order.
    ClearFilters,

    /// Ends the session.
    Quit,

    /// Result of a fetch task.
    Fetched(FetchResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean reports whether anything visible changed, so the host can skip a
/// redraw.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for handlers
/// that gain fallible steps.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => {
            if state.session.loaded_page().is_some() || state.session.is_loading() {
                return Ok((false, vec![]));
            }
            Ok(begin_page(state, 1))
        }
        Event::NextPage => {
            if state.view != View::List {
                return Ok((false, vec![]));
            }
            let Some(target) = state.session.next_target() else {
                tracing::debug!("already on last page");
                return Ok((false, vec![]));
            };
            Ok(begin_page(state, target))
        }
        Event::PrevPage => {
            if state.view != View::List {
                return Ok((false, vec![]));
            }
            let Some(target) = state.session.prev_target() else {
                tracing::debug!("already on first page");
                return Ok((false, vec![]));
            };
            Ok(begin_page(state, target))
        }
        Event::ReloadPage => {
            if state.view != View::List {
                return Ok((false, vec![]));
            }
            let page = state.session.pagination().current;
            Ok(begin_page(state, page))
        }
        Event::ShowList => Ok(switch_view(state, View::List)),
        Event::ShowFavorites => Ok(switch_view(state, View::Favorites)),
        Event::CursorDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(record) = state.selected_record() else {
                tracing::debug!("no record selected");
                return Ok((false, vec![]));
            };
            Ok(open_details(state, record))
        }
        Event::ShowDetails(record) => Ok(open_details(state, record.clone())),
        Event::Back => {
            let Some(detail) = state.details.take() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(return_to = ?detail.return_to, "leaving details");
            state.view = detail.return_to;
            state.clamp_selection();
            Ok((true, vec![Action::Cancel(FetchKind::Details)]))
        }
        Event::ToggleSelectedFavorite => {
            let target = match (&state.view, &state.details) {
                (View::Details, Some(detail)) => Some(detail.subject.clone()),
                _ => state.selected_record(),
            };
            let Some(record) = target else {
                return Ok((false, vec![]));
            };
            Ok(toggle_favorite(state, &record))
        }
        Event::ToggleFavorite(record) => Ok(toggle_favorite(state, record)),
        Event::SetSearch(term) => {
            tracing::trace!(query = %term, "search updated");
            state.query.search.clone_from(term);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::SetFilter { field, value } => {
            state.query.set_filter(*field, value.clone());
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::SetOrder(order) => {
            state.query.order = *order;
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.query.clear_filters();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::Fetched(response) => Ok((handle_response(state, response.clone()), vec![])),
    }
}

/// Starts loading `page` under a fresh ticket.
fn begin_page(state: &mut AppState, page: u32) -> (bool, Vec<Action>) {
    let ticket = state.issue_ticket();
    if !state.session.begin_page(page, ticket) {
        return (false, vec![]);
    }
    tracing::debug!(page, ticket = %ticket, "requesting page");
    (true, vec![Action::Fetch(FetchRequest::load_page(ticket, page))])
}

fn switch_view(state: &mut AppState, view: View) -> (bool, Vec<Action>) {
    let mut actions = vec![];
    if state.details.take().is_some() {
        actions.push(Action::Cancel(FetchKind::Details));
    }
    state.view = view;
    state.selected_index = 0;
    (true, actions)
}

fn open_details(state: &mut AppState, record: Record) -> (bool, Vec<Action>) {
    let return_to = match (&state.view, &state.details) {
        (View::Details, Some(detail)) => detail.return_to,
        (view, _) => *view,
    };

    let ticket = state.issue_ticket();
    let id = record.id;
    tracing::debug!(id, name = %record.name, ticket = %ticket, "opening details");

    let mut detail = DetailState::new(record, return_to);
    detail.begin(ticket);
    state.details = Some(detail);
    state.view = View::Details;

    (true, vec![Action::Fetch(FetchRequest::load_details(ticket, id))])
}

fn toggle_favorite(state: &mut AppState, record: &Record) -> (bool, Vec<Action>) {
    state.session.toggle_favorite(record);
    // Unfavoriting in the favorites view shrinks the visible set.
    state.clamp_selection();
    (true, vec![])
}

/// Feeds a fetch result into the state. Returns whether it was applied.
fn handle_response(state: &mut AppState, response: FetchResponse) -> bool {
    match response {
        FetchResponse::PageLoaded { ticket, page } => {
            let applied = state.session.apply_page(ticket, page);
            if applied {
                state.clamp_selection();
            }
            applied
        }
        FetchResponse::DetailsLoaded { ticket, details } => state
            .details
            .as_mut()
            .is_some_and(|detail| detail.resolve(ticket, *details)),
        FetchResponse::Failed {
            ticket,
            kind: FetchKind::Page,
            message,
        } => state.session.fail_page(ticket, message),
        FetchResponse::Failed {
            ticket,
            kind: FetchKind::Details,
            message,
        } => {
            let Some(detail) = state.details.as_mut() else {
                return false;
            };
            let failed = detail.fail(ticket);
            if failed {
                tracing::warn!(id = detail.subject.id, error = %message, "details load failed");
            }
            failed
        }
    }
}
