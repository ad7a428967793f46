//! Authentication extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::LoginNotice;
use crate::state::AppState;

/// Extractor that requires a stored auth token.
///
/// If the user is not logged in, the request is answered with a redirect to
/// `/login?notice=required` before the handler runs, so nothing protected is
/// rendered.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireAuth) -> impl IntoResponse {
///     "only for logged-in users"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth;

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.auth().is_authenticated() {
            Ok(Self)
        } else {
            tracing::debug!(path = %parts.uri.path(), "Unauthenticated request to protected page");
            Err(AppError::NotAuthenticated(LoginNotice::Required))
        }
    }
}

/// Check the auth gate before a mutation, naming what was attempted.
///
/// # Errors
///
/// Returns `AppError::NotAuthenticated(notice)` when no token is stored.
pub fn require_login(state: &AppState, notice: LoginNotice) -> Result<(), AppError> {
    if state.auth().is_authenticated() {
        Ok(())
    } else {
        tracing::warn!(notice = notice.as_str(), "Blocked action for anonymous user");
        Err(AppError::NotAuthenticated(notice))
    }
}
