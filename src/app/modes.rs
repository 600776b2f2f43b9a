//! View selection and the detail-view state machine.
//!
//! # State Machine
//!
//! The detail view moves through `Idle → Loading → {Loaded | Errored}` for each
//! subject record. A failure is terminal until the user navigates away and
//! opens the record again.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::modes::{DetailPhase, DetailState, View};
//! use dexview::worker::FetchTicket;
//! use dexview::Record;
//!
//! let mut detail = DetailState::new(Record::new(25, "pikachu", "pikachu"), View::List);
//! detail.begin(FetchTicket::new(1));
//! assert!(matches!(detail.phase, DetailPhase::Loading { .. }));
//! ```

use crate::domain::{Record, RecordDetails};
use crate::worker::FetchTicket;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Paginated listing from the web service.
    #[default]
    List,

    /// The whole favorites collection as a single unpaginated page.
    Favorites,

    /// Detail page of one record.
    Details,
}

/// Lifecycle of the detail fetch for the current subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    Loading { ticket: FetchTicket },
    Loaded(Box<RecordDetails>),
    Errored,
}

/// Detail view state: the subject, its fetch phase, and where "back" leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    /// Summary form the view was opened with. Favorite toggles act on this.
    pub subject: Record,
    pub phase: DetailPhase,
    /// View to restore on back-navigation. Never [`View::Details`].
    pub return_to: View,
}

impl DetailState {
    #[must_use]
    pub fn new(subject: Record, return_to: View) -> Self {
        let return_to = if return_to == View::Details {
            View::List
        } else {
            return_to
        };

        Self {
            subject,
            phase: DetailPhase::Idle,
            return_to,
        }
    }

    /// Enters `Loading` for the fetch identified by `ticket`.
    pub fn begin(&mut self, ticket: FetchTicket) {
        self.phase = DetailPhase::Loading { ticket };
    }

    /// Ticket of the outstanding fetch, if loading.
    #[must_use]
    pub const fn pending_ticket(&self) -> Option<FetchTicket> {
        match self.phase {
            DetailPhase::Loading { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// Moves to `Loaded` if `ticket` matches the outstanding fetch.
    ///
    /// Returns `false` for stale results.
    pub fn resolve(&mut self, ticket: FetchTicket, details: RecordDetails) -> bool {
        if self.pending_ticket() != Some(ticket) {
            return false;
        }
        self.phase = DetailPhase::Loaded(Box::new(details));
        true
    }

    /// Moves to `Errored` if `ticket` matches the outstanding fetch.
    ///
    /// Returns `false` for stale failures.
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if self.pending_ticket() != Some(ticket) {
            return false;
        }
        self.phase = DetailPhase::Errored;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sprites;

    fn details(id: u32) -> RecordDetails {
        RecordDetails {
            id,
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            order: 35,
            abilities: vec![],
            types: vec![],
            species: "pikachu".into(),
            sprites: Sprites::default(),
        }
    }

    #[test]
    fn starts_idle_and_never_returns_to_details() {
        let state = DetailState::new(Record::new(25, "pikachu", "pikachu"), View::Details);
        assert_eq!(state.phase, DetailPhase::Idle);
        assert_eq!(state.return_to, View::List);
    }

    #[test]
    fn stale_result_does_not_resolve() {
        let mut state = DetailState::new(Record::new(25, "pikachu", "pikachu"), View::Favorites);
        state.begin(FetchTicket::new(2));

        assert!(!state.resolve(FetchTicket::new(1), details(25)));
        assert!(!state.fail(FetchTicket::new(1)));
        assert_eq!(state.pending_ticket(), Some(FetchTicket::new(2)));

        assert!(state.resolve(FetchTicket::new(2), details(25)));
        assert!(matches!(state.phase, DetailPhase::Loaded(_)));
    }

    #[test]
    fn failure_is_terminal() {
        let mut state = DetailState::new(Record::new(25, "pikachu", "pikachu"), View::List);
        state.begin(FetchTicket::new(3));
        assert!(state.fail(FetchTicket::new(3)));
        assert!(!state.resolve(FetchTicket::new(3), details(25)));
        assert_eq!(state.phase, DetailPhase::Errored);
    }
}
