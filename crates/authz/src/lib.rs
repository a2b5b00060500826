//! Bearer sessions and the guard used by protected procedures.
//!
//! The security model is deliberately thin: a request either carries a
//! non-empty bearer token or it does not.

use thiserror::Error;

const BEARER: &str = "Bearer";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("a signed-in session is required")]
    MissingSession,
}

/// Caller identity derived from an `authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Parse an `authorization` header value. `Bearer` with no token, other
    /// schemes and blank values yield no session.
    pub fn from_authorization(header: &str) -> Option<Self> {
        let (scheme, token) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case(BEARER) {
            return None;
        }

        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        Some(Self {
            token: token.to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Guard for protected procedures.
pub fn require_session(session: Option<&Session>) -> Result<&Session, AuthzError> {
    session.ok_or_else(|| {
        tracing::debug!("protected procedure called without a session");
        AuthzError::MissingSession
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_token() {
        let session = Session::from_authorization("Bearer abc123").unwrap();
        assert_eq!(session.token(), "abc123");

        let lowercase = Session::from_authorization("bearer  xyz ").unwrap();
        assert_eq!(lowercase.token(), "xyz");
    }

    #[test]
    fn bare_scheme_is_anonymous() {
        assert_eq!(Session::from_authorization("Bearer"), None);
        assert_eq!(Session::from_authorization("Bearer   "), None);
        assert_eq!(Session::from_authorization(""), None);
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(Session::from_authorization("Basic dXNlcjpwYXNz"), None);
    }

    #[test]
    fn guard_requires_session() {
        assert_eq!(require_session(None), Err(AuthzError::MissingSession));

        let session = Session::from_authorization("Bearer t").unwrap();
        assert_eq!(require_session(Some(&session)), Ok(&session));
    }
}
