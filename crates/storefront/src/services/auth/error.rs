//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong username or password.
    #[error("Invalid username or password")]
    InvalidCredentials,
}
