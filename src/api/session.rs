//! Explicit authentication context for backend requests.
//!
//! A [`Session`] is created once by the application root (from configuration or a
//! login flow owned elsewhere) and handed to whatever performs authenticated
//! requests. Nothing in the crate reads credentials from ambient global state.

use std::fmt;

/// Credentials and identity attached to backend requests.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user_id: Option<String>,
}

impl Session {
    /// A session with no credentials; requests are sent unauthenticated.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying a bearer token. Blank tokens are treated as absent.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then(|| token.trim().to_string()),
            user_id: None,
        }
    }

    /// Attaches the authenticated user's identifier.
    #[must_use]
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_anonymous() {
        assert!(!Session::with_token("   ").is_authenticated());
        assert!(Session::with_token("abc").is_authenticated());
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::with_token("secret-token").for_user("u1");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("u1"));
    }
}
