//! Explicit session-token handling.
//!
//! The browser original read an ambient `user-id` cookie on every request;
//! here the token is an explicit value injected into the request layer. The
//! backend may rotate it on any response (the `cookie` field), and the
//! caller must persist the new value before issuing another request.

use secrecy::{ExposeSecret, SecretString};

use resell_core::User;

/// Opaque per-browser session token correlating requests to a backend-held
/// user record.
///
/// Held in a [`SecretString`] so it never appears in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the token value for a request header or for persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

/// A bootstrapped session: the fetched user plus the token that
/// authenticates it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The user record the backend returned.
    pub user: User,
    /// The token to present on subsequent requests.
    pub token: SessionToken,
    /// Whether the backend issued a new token in this response. When true,
    /// the caller must persist [`Session::token`] before anything else.
    pub rotated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let token = SessionToken::new("very-secret-session-value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("very-secret-session-value"));
    }

    #[test]
    fn test_expose_round_trips() {
        let token = SessionToken::new("abc123");
        assert_eq!(token.expose(), "abc123");
        assert_eq!(token, SessionToken::new("abc123"));
        assert_ne!(token, SessionToken::new("other"));
    }
}
