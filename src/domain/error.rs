//! Error types for the event board client.
//!
//! This module defines the centralized error type [`EventBoardError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for event board operations.
///
/// Consolidates every failure the crate can surface, from backend requests to
/// configuration loading. Most variants wrap underlying errors from external crates
/// using `#[from]` for automatic conversion.
///
/// The view-model never shows these to the user directly: a failed page load is
/// logged with its cause and replaced by a single user-facing message.
#[derive(Debug, Error)]
pub enum EventBoardError {
    /// Transport-level request failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("backend returned {status} for {url}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Request URL, without credentials.
        url: String,
    },

    /// The backend answered with a body that does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A caller asked for something the backend contract cannot express.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON document (event draft file, response body) could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for event board operations.
pub type Result<T> = std::result::Result<T, EventBoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_code_and_url() {
        let err = EventBoardError::Status {
            status: 503,
            url: "http://localhost:3000/api/events".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 503 for http://localhost:3000/api/events"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open() -> Result<()> {
            let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
            Err::<(), _>(missing)?;
            Ok(())
        }
        assert!(matches!(open(), Err(EventBoardError::Io(_))));
    }
}
