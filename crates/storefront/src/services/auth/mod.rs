//! Authentication service.
//!
//! Login is a static credential match: the configured username and password
//! produce the configured token, which is written to storage. Anything that
//! finds a non-empty token under the auth key treats the user as logged in.
//! This gates what the UI lets a visitor do; it is not a security boundary.

mod error;

pub use error::AuthError;

use secrecy::ExposeSecret;
use shopfront_core::AuthToken;

use crate::config::LoginConfig;
use crate::storage::{SharedStorage, keys};

/// Something that can turn a username and password into a token.
pub trait Authenticator: Send + Sync {
    /// Check the credentials and issue a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the credentials do not match.
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthToken, AuthError>;
}

/// Single hardcoded user.
pub struct StaticCredentials {
    config: LoginConfig,
}

impl StaticCredentials {
    #[must_use]
    pub const fn new(config: LoginConfig) -> Self {
        Self { config }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthToken, AuthError> {
        if username != self.config.username || password != self.config.password.expose_secret() {
            return Err(AuthError::InvalidCredentials);
        }

        AuthToken::parse(self.config.token.expose_secret()).ok_or(AuthError::InvalidCredentials)
    }
}

/// Token presence check over local storage.
#[derive(Clone)]
pub struct AuthGate {
    storage: SharedStorage,
}

impl AuthGate {
    #[must_use]
    pub const fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// The stored token, if a non-empty one exists.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.storage
            .get(keys::AUTH_TOKEN)
            .and_then(|raw| AuthToken::parse(&raw))
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store `token`, logging the user in.
    pub fn sign_in(&self, token: &AuthToken) {
        self.storage.set(keys::AUTH_TOKEN, token.as_str());
        tracing::info!("User signed in");
    }

    /// Drop the stored token.
    pub fn sign_out(&self) {
        self.storage.remove(keys::AUTH_TOKEN);
        tracing::info!("User signed out");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::SecretString;

    use super::*;
    use crate::storage::{DetachedStorage, MemoryStorage};

    fn credentials() -> StaticCredentials {
        StaticCredentials::new(LoginConfig {
            username: "user".to_string(),
            password: SecretString::from("123456"),
            token: SecretString::from("issued-token"),
        })
    }

    #[test]
    fn test_authenticate_accepts_configured_credentials() {
        let token = credentials().authenticate("user", "123456").unwrap();
        assert_eq!(token.as_str(), "issued-token");
    }

    #[test]
    fn test_authenticate_rejects_wrong_credentials() {
        let auth = credentials();
        assert_eq!(
            auth.authenticate("user", "wrong").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            auth.authenticate("admin", "123456").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(auth.authenticate("", "").is_err());
    }

    #[test]
    fn test_gate_sign_in_and_out() {
        let gate = AuthGate::new(Arc::new(MemoryStorage::new()));
        assert!(!gate.is_authenticated());

        gate.sign_in(&AuthToken::parse("t").unwrap());
        assert!(gate.is_authenticated());

        gate.sign_out();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_gate_treats_empty_token_as_absent() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        storage.set(keys::AUTH_TOKEN, "");

        assert!(!AuthGate::new(storage).is_authenticated());
    }

    #[test]
    fn test_gate_without_storage_is_never_authenticated() {
        let gate = AuthGate::new(Arc::new(DetachedStorage));
        gate.sign_in(&AuthToken::parse("t").unwrap());
        assert!(!gate.is_authenticated());
    }
}
