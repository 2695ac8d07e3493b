//! Eventboard: a client for browsing, filtering and editing events served by a REST
//! backend.
//!
//! Eventboard provides:
//! - Paginated event loading (10 per page) with load-more accumulation
//! - Client-side filtering by text, city, date range, price range and attire
//! - Sorting by nearest date, newest date or lowest price
//! - Event detail, create and update through the same backend
//! - Structured logging with optional span export to a JSON-lines file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and pagination                    │
//! │  - Filter and sort pipeline                         │
//! │  - Async view-model driver                          │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ UI Layer (ui/)        │           │ API Layer (api/)      │
//! │ - View models         │           │ - EventSource trait   │
//! │ - Text rendering      │           │ - HTTP client         │
//! └───────────────────────┘           └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Event model, date and price parsing              │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Backend access behind the [`api::EventSource`] trait
//! - [`app`]: List state machine and view-model
//! - [`domain`]: Core domain types (Event, errors)
//! - [`ui`]: View models and text rendering
//! - [`observability`]: Subscriber setup and span export
//!
//! # Configuration
//!
//! Configuration is read from a TOML file; every key is optional:
//!
//! ```toml
//! api_base_url = "https://events.example.com"
//! api_token = "secret"
//! api_user = "organizer-42"
//! request_timeout_secs = 10
//! trace_level = "debug"
//! trace_file = "/tmp/eventboard-spans.jsonl"
//! ```
//!
//! `EVENTBOARD_API_TOKEN` overrides `api_token` when set.
//!
//! # Example
//!
//! ```rust
//! use eventboard::app::{handle_event, EventListState, ListEvent};
//!
//! let mut state = EventListState::new();
//! let (_, actions) = handle_event(&mut state, ListEvent::LoadPage { page: 1, append: false })?;
//! assert_eq!(actions.len(), 1);
//! assert!(state.loading);
//! # Ok::<(), eventboard::EventBoardError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod observability;
pub mod ui;

pub use api::{EventSource, HttpEventSource, Session};
pub use app::{EventListState, EventListViewModel, FilterAction, FilterState, SortMode};
pub use domain::{Event, EventBoardError, Result};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides [`Config::api_token`].
pub const TOKEN_ENV_VAR: &str = "EVENTBOARD_API_TOKEN";

/// Client configuration, usually loaded from a TOML file.
///
/// # Example
///
/// ```rust
/// use eventboard::Config;
///
/// let config = Config::from_toml_str("api_base_url = \"https://events.example.com\"")?;
/// assert_eq!(config.api_base_url, "https://events.example.com");
/// assert_eq!(config.request_timeout_secs, 10);
/// # Ok::<(), eventboard::EventBoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backend root; event endpoints live under `/api/events`.
    ///
    /// Default: `"http://localhost:3000"`
    pub api_base_url: String,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Identifier of the user the token belongs to; attached to the session.
    pub api_user: Option<String>,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Level filter for the subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` wins when set. Default: `"info"`
    pub trace_level: String,

    /// Appends finished spans to this file as JSON lines.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: None,
            api_user: None,
            request_timeout_secs: 10,
            trace_level: "info".to_string(),
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses and validates configuration from TOML text.
    ///
    /// Environment overrides are not applied; see [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns [`EventBoardError::Toml`] for malformed TOML or unknown keys, and
    /// [`EventBoardError::Config`] when a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file at `path`, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`EventBoardError::Io`] when the file cannot be read, plus the errors
    /// of [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?.with_env_overrides())
    }

    /// Replaces the token with `EVENTBOARD_API_TOKEN` when that variable is set and
    /// not blank.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                self.api_token = Some(token);
            }
        }
        self
    }

    /// Checks the base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EventBoardError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url).map_err(|e| {
            EventBoardError::Config(format!("api_base_url {:?}: {e}", self.api_base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EventBoardError::Config(format!(
                "api_base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(EventBoardError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Session carrying the configured token and user, or an anonymous one.
    #[must_use]
    pub fn session(&self) -> Session {
        let session = self
            .api_token
            .as_deref()
            .map_or_else(Session::anonymous, Session::with_token);
        match &self.api_user {
            Some(user) if !user.trim().is_empty() => session.for_user(user.trim()),
            _ => session,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the HTTP event source described by this configuration.
    ///
    /// # Errors
    ///
    /// Fails when the base URL is rejected or the HTTP client cannot be built.
    pub fn event_source(&self) -> Result<HttpEventSource> {
        HttpEventSource::new(&self.api_base_url, self.session(), self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml_str("").expect("empty config");
        assert_eq!(config, Config::default());
        assert!(!config.session().is_authenticated());
        assert_eq!(config.session().user_id(), None);
    }

    #[test]
    fn full_document_is_parsed() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://events.example.com/"
            api_token = "abc"
            api_user = "organizer-42"
            request_timeout_secs = 3
            trace_level = "debug"
            trace_file = "/tmp/spans.jsonl"
            "#,
        )
        .expect("config");

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.session().token(), Some("abc"));
        assert_eq!(config.session().user_id(), Some("organizer-42"));
        assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/spans.jsonl")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("scan_depth = 4").expect_err("unknown key");
        assert!(matches!(err, EventBoardError::Toml(_)));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = Config::from_toml_str("api_base_url = \"ftp://host\"").expect_err("scheme");
        assert!(matches!(err, EventBoardError::Config(_)));

        let err = Config::from_toml_str("request_timeout_secs = 0").expect_err("timeout");
        assert!(matches!(err, EventBoardError::Config(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "request_timeout_secs = 7").expect("write");

        let config = Config::load(file.path()).expect("load");
        assert_eq!(config.request_timeout_secs, 7);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Config::load(dir.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(err, EventBoardError::Io(_)));
    }
}
