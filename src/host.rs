//! Host runtime: executes actions and feeds fetch results back as events.
//!
//! The host owns the [`AppState`] and the [`FetchWorker`]. Each fetch runs as
//! its own task on the tokio runtime, wrapped in an [`Abortable`] so that a
//! superseding request or a `Cancel` action stops it. Completed fetches are
//! delivered over a channel and dispatched as [`Event::Fetched`].
//!
//! Must be driven from within a tokio runtime.

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::worker::{FetchKind, FetchRequest, FetchResponse, FetchTicket, FetchWorker};
use futures_util::future::{AbortHandle, Abortable};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// A spawned fetch and the handle that aborts it.
struct InFlight {
    ticket: FetchTicket,
    handle: AbortHandle,
}

pub struct Host {
    state: AppState,
    worker: FetchWorker,
    responses_tx: mpsc::UnboundedSender<FetchResponse>,
    responses_rx: mpsc::UnboundedReceiver<FetchResponse>,
    /// At most one outstanding fetch per kind.
    in_flight: HashMap<FetchKind, InFlight>,
    running: bool,
}

impl Host {
    #[must_use]
    pub fn new(state: AppState, worker: FetchWorker) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            state,
            worker,
            responses_tx,
            responses_rx,
            in_flight: HashMap::new(),
            running: true,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// `false` once a `Quit` action has been executed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a fetch of `kind` is still outstanding.
    #[must_use]
    pub fn is_fetching(&self, kind: FetchKind) -> bool {
        self.in_flight.contains_key(&kind)
    }

    /// Processes one event and executes the resulting actions.
    ///
    /// Returns whether the screen should be redrawn.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        if let Event::Fetched(response) = event {
            self.settle(response);
        }

        let (changed, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(changed)
    }

    /// Waits for the next fetch to finish.
    ///
    /// Never returns `None` while the host is alive, since it holds a sender
    /// itself; callers select on it alongside input.
    pub async fn next_response(&mut self) -> Option<FetchResponse> {
        self.responses_rx.recv().await
    }

    /// Waits for the next fetch result and dispatches it.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn pump(&mut self) -> Result<bool> {
        match self.next_response().await {
            Some(response) => self.dispatch(&Event::Fetched(response)),
            None => Ok(false),
        }
    }

    /// Renders the current state into a frame `cols` columns wide.
    #[must_use]
    pub fn render(&self, cols: usize) -> String {
        crate::ui::render(&self.state, cols)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Fetch(request) => self.spawn_fetch(request),
            Action::Cancel(kind) => self.cancel(kind),
            Action::Quit => {
                tracing::debug!(in_flight = self.in_flight.len(), "quitting");
                for (_, fetch) in self.in_flight.drain() {
                    fetch.handle.abort();
                }
                self.running = false;
            }
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let kind = request.kind();
        let ticket = request.ticket();
        self.cancel(kind);

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight.insert(kind, InFlight { ticket, handle });

        let worker = self.worker.clone();
        let responses = self.responses_tx.clone();
        tokio::spawn(async move {
            if let Ok(response) = Abortable::new(worker.handle_message(request), registration).await {
                // The receiver only goes away with the host.
                let _ = responses.send(response);
            }
        });
        tracing::debug!(ticket = %ticket, kind = ?kind, "fetch spawned");
    }

    fn cancel(&mut self, kind: FetchKind) {
        if let Some(fetch) = self.in_flight.remove(&kind) {
            tracing::debug!(ticket = %fetch.ticket, kind = ?kind, "aborting fetch");
            fetch.handle.abort();
        }
    }

    /// Forgets the in-flight entry a response belongs to.
    fn settle(&mut self, response: &FetchResponse) {
        let kind = response.kind();
        if self
            .in_flight
            .get(&kind)
            .is_some_and(|fetch| fetch.ticket == response.ticket())
        {
            self.in_flight.remove(&kind);
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("state", &self.state)
            .field("worker", &self.worker)
            .field("in_flight", &self.in_flight.len())
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
