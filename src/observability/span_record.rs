//! Compact JSON-lines span records.
//!
//! Each finished span becomes one self-contained JSON object, so the trace file
//! can be inspected with `jq` or grepped by trace ID without a collector.
//!
//! ```json
//! {"service":"dexview","traceId":"…","spanId":"…","parentSpanId":"…",
//!  "name":"fetch_worker_handle","startUnixNano":…,"durationMicros":…,
//!  "status":"unset","attributes":{"kind":"Page","ticket":"#3"},"events":[…]}
//! ```

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One exported span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub service: String,
    pub trace_id: String,

    pub span_id: String,

    /// Empty for root spans.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_span_id: String,

    pub name: String,
    pub start_unix_nano: u128,
    pub duration_micros: u128,
    pub status: String,
    pub attributes: Map<String, JsonValue>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
}

/// A log event recorded inside a span, e.g. a `tracing::debug!` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub name: String,

    /// Offset from the span start.
    pub offset_micros: u128,

    pub attributes: Map<String, JsonValue>,
}

impl SpanRecord {
    /// Flattens SDK span data into a record for `service`.
    #[must_use]
    pub fn from_span(service: &str, span: &SpanData) -> Self {
        let start = unix_nanos(span.start_time);
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);

        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        let events = span
            .events
            .iter()
            .map(|event| EventRecord {
                name: event.name.to_string(),
                offset_micros: event
                    .timestamp
                    .duration_since(span.start_time)
                    .unwrap_or(Duration::ZERO)
                    .as_micros(),
                attributes: attribute_map(&event.attributes),
            })
            .collect();

        Self {
            service: service.to_string(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            start_unix_nano: start,
            duration_micros: duration.as_micros(),
            status: status_label(&span.status),
            attributes: attribute_map(&span.attributes),
            events,
        }
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

fn status_label(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

/// Collapses key/value pairs into a JSON object. Later duplicates win.
pub fn attribute_map(attributes: &[KeyValue]) -> Map<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), json_value(&kv.value)))
        .collect()
}

fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}
