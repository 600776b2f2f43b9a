//! Fetch worker: turns [`FetchRequest`]s into [`FetchResponse`]s.
//!
//! The worker is stateless apart from its API handle. Each request is handled by
//! an independent future that the host spawns on the runtime, so superseded
//! fetches can be aborted without affecting others.

use crate::api::CatalogApi;
use crate::catalog::pagination::{offset_for, PAGE_SIZE};
use crate::catalog::LoadedPage;
use crate::domain::error::Result;
use crate::domain::{Record, RecordDetails};
use crate::worker::{FetchKind, FetchRequest, FetchResponse, FetchTicket};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::Instrument;

/// Executes fetch requests against a [`CatalogApi`].
#[derive(Clone)]
pub struct FetchWorker {
    api: Arc<dyn CatalogApi>,
    /// Maximum number of enrichment fetches in flight for one page.
    concurrency: usize,
}

impl FetchWorker {
    /// Creates a worker. A `concurrency` of zero is treated as one.
    #[must_use]
    pub fn new(api: Arc<dyn CatalogApi>, concurrency: usize) -> Self {
        Self {
            api,
            concurrency: concurrency.max(1),
        }
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Processes one request and returns the matching response.
    ///
    /// Never fails: errors become [`FetchResponse::Failed`]. The work runs in a
    /// span parented to the request's trace context when one is present.
    pub async fn handle_message(&self, request: FetchRequest) -> FetchResponse {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let ticket = request.ticket();
        let kind = request.kind();

        let span = tracing::debug_span!("fetch_worker_handle", ticket = %ticket, kind = ?kind);
        if let Some(parent) = Self::parent_trace_context(&request) {
            span.set_parent(parent);
        }

        async move {
            let response = match request {
                FetchRequest::LoadPage { page, .. } => self
                    .load_page(page)
                    .await
                    .map(|page| FetchResponse::PageLoaded { ticket, page }),
                FetchRequest::LoadDetails { id, .. } => self
                    .load_details(id)
                    .await
                    .map(|details| FetchResponse::DetailsLoaded {
                        ticket,
                        details: Box::new(details),
                    }),
            };

            response.unwrap_or_else(|e| Self::failure(ticket, kind, &e))
        }
        .instrument(span)
        .await
    }

    /// Fetches listing page `page` and enriches every entry, at most
    /// `concurrency` detail fetches at a time.
    ///
    /// Output order matches the listing order. The first failing enrichment
    /// fails the whole page and drops the fetches still in flight.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure encountered.
    pub async fn load_page(&self, page: u32) -> Result<LoadedPage> {
        let listing = self.api.list(PAGE_SIZE, offset_for(page)).await?;
        tracing::debug!(page, count = listing.count, entries = listing.results.len(), "listing fetched");

        let api = &self.api;
        let records: Vec<Record> = stream::iter(listing.results)
            .map(|entry| async move {
                let details = api.record_at(&entry.url).await?;
                Ok::<_, crate::DexError>(details.summary())
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        Ok(LoadedPage {
            page,
            count: listing.count,
            records,
        })
    }

    /// Fetches the detail form of record `id`.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn load_details(&self, id: u32) -> Result<RecordDetails> {
        let details = self.api.record(id).await?;
        tracing::debug!(id, name = %details.name, "details fetched");
        Ok(details)
    }

    fn failure(ticket: FetchTicket, kind: FetchKind, error: &crate::DexError) -> FetchResponse {
        tracing::debug!(ticket = %ticket, kind = ?kind, remote = error.is_fetch_failure(), error = %error, "fetch failed");
        FetchResponse::Failed {
            ticket,
            kind,
            message: error.to_string(),
        }
    }

    /// Rebuilds the remote parent context carried by a request.
    fn parent_trace_context(request: &FetchRequest) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = request.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NamedResource, PageListing};
    use crate::domain::{DexError, Sprites};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Serves `count` records; ids listed in `broken` fail enrichment.
    struct FakeApi {
        count: u32,
        broken: Vec<u32>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeApi {
        fn new(count: u32) -> Self {
            Self {
                count,
                broken: Vec::new(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        fn details(id: u32) -> RecordDetails {
            RecordDetails {
                id,
                name: format!("mon-{id}"),
                height: 7,
                weight: 69,
                base_experience: Some(64),
                order: i32::try_from(id).unwrap_or(0),
                abilities: vec!["overgrow".into()],
                types: vec!["grass".into()],
                species: format!("mon-{id}"),
                sprites: Sprites {
                    front: Some(format!("https://img/{id}.png")),
                    ..Sprites::default()
                },
            }
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn list(&self, limit: u32, offset: u32) -> Result<PageListing> {
            let end = (offset + limit).min(self.count);
            Ok(PageListing {
                count: self.count,
                results: (offset + 1..=end)
                    .map(|id| NamedResource {
                        name: format!("mon-{id}"),
                        url: format!("fake://{id}"),
                    })
                    .collect(),
            })
        }

        async fn record_at(&self, url: &str) -> Result<RecordDetails> {
            let id: u32 = url
                .trim_start_matches("fake://")
                .parse()
                .map_err(|_| DexError::Decode(url.to_string()))?;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.broken.contains(&id) {
                return Err(DexError::Status {
                    status: 500,
                    url: url.to_string(),
                });
            }
            Ok(Self::details(id))
        }

        async fn record(&self, id: u32) -> Result<RecordDetails> {
            if id > self.count {
                return Err(DexError::Status {
                    status: 404,
                    url: format!("fake://{id}"),
                });
            }
            Ok(Self::details(id))
        }
    }

    #[tokio::test]
    async fn page_is_enriched_in_listing_order() {
        let worker = FetchWorker::new(Arc::new(FakeApi::new(45)), 4);

        let page = worker.load_page(3).await.unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.count, 45);
        let ids: Vec<u32> = page.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.records[0].image.as_deref(), Some("https://img/41.png"));
    }

    #[tokio::test]
    async fn enrichment_respects_concurrency_bound() {
        let api = Arc::new(FakeApi::new(20));
        let worker = FetchWorker::new(api.clone(), 3);

        worker.load_page(1).await.unwrap();

        assert!(api.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn one_failed_enrichment_fails_the_page() {
        let mut api = FakeApi::new(20);
        api.broken = vec![7];
        let worker = FetchWorker::new(Arc::new(api), 8);

        let response = worker
            .handle_message(FetchRequest::load_page(FetchTicket::new(4), 1))
            .await;

        match response {
            FetchResponse::Failed { ticket, kind, message } => {
                assert_eq!(ticket, FetchTicket::new(4));
                assert_eq!(kind, FetchKind::Page);
                assert!(message.contains("500"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn details_response_carries_ticket() {
        let worker = FetchWorker::new(Arc::new(FakeApi::new(20)), 8);

        let response = worker
            .handle_message(FetchRequest::load_details(FetchTicket::new(9), 12))
            .await;

        match response {
            FetchResponse::DetailsLoaded { ticket, details } => {
                assert_eq!(ticket, FetchTicket::new(9));
                assert_eq!(details.id, 12);
                assert_eq!(details.height, 7);
            }
            other => panic!("expected details, got {other:?}"),
        }
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let worker = FetchWorker::new(Arc::new(FakeApi::new(1)), 0);
        assert_eq!(worker.concurrency(), 1);
    }
}
