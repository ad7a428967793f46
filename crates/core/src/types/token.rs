//! Opaque authentication token.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque token whose presence means "logged in".
///
/// The token is never inspected; only non-emptiness matters. `Debug` does not
/// print the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token. Returns `None` for an empty string.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Borrow the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_absent() {
        assert!(AuthToken::parse("").is_none());
        assert_eq!(
            AuthToken::parse("abc").map(|t| t.as_str().to_owned()),
            Some("abc".to_owned())
        );
    }

    #[test]
    fn test_token_debug_redacts_value() {
        let token = AuthToken::parse("super-secret-token");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
