//! Fetch request and response messages.
//!
//! This module defines the protocol between the application state machine and the
//! fetch worker that talks to the web service. Requests carry an optional trace
//! context so spans recorded inside spawned fetch tasks link back to the UI
//! event that caused them.

use crate::catalog::LoadedPage;
use crate::domain::RecordDetails;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one fetch so late results can be matched against the latest request.
///
/// Tickets are handed out in increasing order by the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The ticket issued after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of fetch a request or response belongs to.
///
/// At most one fetch of each kind is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchKind {
    Page,
    Details,
}

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so a fetch task
/// spawned on the runtime can parent its spans correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no valid OpenTelemetry span context is active, e.g.
    /// when tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Generates `FetchRequest` constructors that attach the current trace context.
macro_rules! fetch_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl FetchRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

fetch_request_builders! {
    load_page(LoadPage { ticket: FetchTicket, page: u32 }),
    load_details(LoadDetails { ticket: FetchTicket, id: u32 }),
}

/// Requests sent from the state machine to the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchRequest {
    /// Fetch one listing page and enrich every entry with its details.
    LoadPage {
        ticket: FetchTicket,

        /// 1-based page number.
        page: u32,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the detail form of one record.
    LoadDetails {
        ticket: FetchTicket,

        /// Record identifier.
        id: u32,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl FetchRequest {
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        match self {
            Self::LoadPage { ticket, .. } | Self::LoadDetails { ticket, .. } => *ticket,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FetchKind {
        match self {
            Self::LoadPage { .. } => FetchKind::Page,
            Self::LoadDetails { .. } => FetchKind::Details,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadPage { trace_context, .. } | Self::LoadDetails { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the fetch worker back to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchResponse {
    /// A listing page was fetched and fully enriched.
    PageLoaded {
        ticket: FetchTicket,
        page: LoadedPage,
    },

    /// A record's detail form was fetched.
    DetailsLoaded {
        ticket: FetchTicket,
        details: Box<RecordDetails>,
    },

    /// The fetch failed. `message` is for logs, not for display.
    Failed {
        ticket: FetchTicket,
        kind: FetchKind,
        message: String,
    },
}

impl FetchResponse {
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        match self {
            Self::PageLoaded { ticket, .. }
            | Self::DetailsLoaded { ticket, .. }
            | Self::Failed { ticket, .. } => *ticket,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FetchKind {
        match self {
            Self::PageLoaded { .. } => FetchKind::Page,
            Self::DetailsLoaded { .. } => FetchKind::Details,
            Self::Failed { kind, .. } => *kind,
        }
    }
}
