//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host loop and the catalog/storage/worker
//! layers. It implements the event-driven architecture behind the interactive
//! views.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Fetch Responses ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View selection and the detail-view state machine
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DetailPhase, DetailState, View};
pub use state::AppState;
