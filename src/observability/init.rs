//! Tracing initialization and subscriber setup.

use super::exporter;
use super::file_writer::RotatingFile;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported span.
pub const SERVICE_NAME: &str = "dexview";

/// Name of the span file inside the data directory.
pub const TRACE_FILE_NAME: &str = "dexview-spans.jsonl";

/// Installs the global subscriber exporting spans to `<data_dir>/dexview-spans.jsonl`.
///
/// The filter comes from `RUST_LOG` when set, else `config.trace_level`, else
/// `"info"`. Returns the tracer provider so the caller can shut it down on exit,
/// or `None` when the data directory cannot be created or a subscriber is
/// already installed.
pub fn init_tracing(config: &Config) -> Option<TracerProvider> {
    let data_dir = crate::infrastructure::data_dir(config);
    std::fs::create_dir_all(&data_dir).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(config.trace_level.as_deref().unwrap_or("info"))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let file = RotatingFile::new(data_dir.join(TRACE_FILE_NAME));
    let provider = exporter::create_tracer_provider(file, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(provider)
}
