//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after each event. The host executes
//! them in order: fetches are spawned on the async runtime, cancellations abort
//! the outstanding task of a kind, and `Quit` ends the loop.
//!
//! # Example
//!
//! ```rust
//! use dexview::app::Action;
//! use dexview::worker::{FetchRequest, FetchTicket};
//!
//! let actions = vec![Action::Fetch(FetchRequest::load_page(FetchTicket::new(1), 1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::{FetchKind, FetchRequest};

/// Commands the host executes on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts a fetch on the worker.
    ///
    /// Supersedes any outstanding fetch of the same [`FetchKind`]; the host
    /// aborts the older task before spawning this one.
    Fetch(FetchRequest),

    /// Aborts the outstanding fetch of a kind, if any.
    ///
    /// Emitted when the user leaves the view waiting on it.
    Cancel(FetchKind),

    /// Ends the session.
    Quit,
}
