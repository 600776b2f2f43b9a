//! OpenTelemetry-based observability with file-based span export.
//!
//! Spans produced by `tracing` macros are bridged into OpenTelemetry and written
//! as JSON lines for offline analysis. No collector is involved.
//!
//! # Architecture
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → RotatingFile
//! ```
//!
//! # Configuration
//!
//! The filter is taken from `RUST_LOG` if set, otherwise from
//! `Config::trace_level`, otherwise `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: Span exporter and tracer provider construction
//! - [`span_record`]: Flattened JSON form of one span
//! - [`file_writer`]: Append-only file with numbered rotation

mod exporter;
pub mod file_writer;
pub mod init;
pub mod span_record;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
