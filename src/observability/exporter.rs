//! OpenTelemetry span exporter that appends JSON lines to a rotating file.

use super::file_writer::RotatingFile;
use super::span_record::SpanRecord;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry::KeyValue;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::fmt::Write as _;

/// Writes every exported span as one [`SpanRecord`] line.
struct JsonLinesExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: bool,
}

impl JsonLinesExporter {
    const fn new(file: RotatingFile, service: String) -> Self {
        Self {
            file,
            service,
            is_shutdown: false,
        }
    }

    fn encode(&self, batch: &[SpanData]) -> Result<String, TraceError> {
        let mut lines = String::new();
        for span in batch {
            let record = SpanRecord::from_span(&self.service, span);
            let json = serde_json::to_string(&record)
                .map_err(|e| TraceError::from(e.to_string()))?;
            let _ = writeln!(lines, "{json}");
        }
        Ok(lines)
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self.encode(&batch).and_then(|lines| {
            self.file
                .append(&lines)
                .map_err(|e| TraceError::from(e.to_string()))
        });

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(name) = resource.get(opentelemetry::Key::new("service.name")) {
            self.service = name.to_string();
        }
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports each span as soon as it closes.
pub fn create_tracer_provider(file: RotatingFile, service: &str) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);
    let exporter = JsonLinesExporter::new(file, service.to_string());

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
