//! Error types for the catalog viewer.
//!
//! This module defines the centralized error type [`DexError`] and a type alias
//! [`Result`] used throughout the crate. All errors derive their `Error`
//! implementation through `thiserror`.
//!
//! None of these errors is fatal to the process: fetch failures become
//! [`FetchResponse::Failed`](crate::worker::FetchResponse::Failed) messages and
//! storage failures are logged and ignored.

use thiserror::Error;

/// The main error type for catalog operations.
///
/// # Examples
///
/// ```
/// use dexview::DexError;
///
/// fn read_blob() -> Result<(), DexError> {
///     Err(DexError::Storage("blob is locked".to_string()))
/// }
///
/// assert!(read_blob().unwrap_err().to_string().contains("blob is locked"));
/// ```
#[derive(Debug, Error)]
pub enum DexError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body was not the JSON shape the client expects.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Reading from or writing to the host key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DexError {
    /// Returns `true` for failures that happened while talking to the web service.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. } | Self::Decode(_))
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_url() {
        let err = DexError::Status {
            status: 404,
            url: "https://pokeapi.co/api/v2/pokemon/99999/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 404 from https://pokeapi.co/api/v2/pokemon/99999/"
        );
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn storage_errors_are_not_fetch_failures() {
        assert!(!DexError::Storage("disk full".into()).is_fetch_failure());
        assert!(!DexError::Config("bad".into()).is_fetch_failure());
    }
}
