//! Background fetch worker for web-service requests.
//!
//! The state machine never performs I/O itself. It emits [`FetchRequest`]s that
//! the host hands to the [`FetchWorker`] on the async runtime. Results come back
//! as [`FetchResponse`]s tagged with the [`FetchTicket`] of their request.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation with bounded page enrichment

pub mod handler;
pub mod messages;

pub use handler::FetchWorker;
pub use messages::{FetchKind, FetchRequest, FetchResponse, FetchTicket, TraceContext};
