//! Domain layer for the catalog viewer.
//!
//! Core record types and the crate error type, independent of the web service,
//! the storage backend, and the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Summary and detail record models
//!
//! # Examples
//!
//! ```
//! use dexview::domain::{Record, Result};
//!
//! fn starter() -> Result<Record> {
//!     Ok(Record::new(1, "bulbasaur", "bulbasaur").with_types(["grass", "poison"]))
//! }
//! ```

pub mod error;
pub mod record;

pub use error::{DexError, Result};
pub use record::{ImageSlot, Record, RecordDetails, Sprites};
