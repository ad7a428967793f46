//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::feed::FeedError;
use crate::filters;
use crate::models::LoginNotice;

/// Shown whenever the product feed cannot be read.
pub const FEED_ERROR_MESSAGE: &str = "Error while fetching data!";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The product feed failed or returned garbage.
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    /// The action needs a logged-in user.
    #[error("Not authenticated ({})", .0.as_str())]
    NotAuthenticated(LoginNotice),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Full-page error view.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error. Redirects report `303 See Other`.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::FeedUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::NotAuthenticated(_) => StatusCode::SEE_OTHER,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message safe to show to the visitor.
    fn public_message(&self) -> String {
        match self {
            // Don't expose transport details to clients
            Self::FeedUnavailable(_) => FEED_ERROR_MESSAGE.to_string(),
            Self::NotAuthenticated(notice) => notice.message().to_string(),
            Self::NotFound(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::NotAuthenticated(notice) = self {
            tracing::debug!(notice = notice.as_str(), "Redirecting to login");
            return Redirect::to(&notice.login_url()).into_response();
        }

        // Capture server errors to Sentry
        if matches!(self, Self::FeedUnavailable(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let page = ErrorTemplate {
            status: status.as_u16(),
            message: self.public_message(),
        };

        (status, page).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::NotAuthenticated(LoginNotice::Cart);
        assert_eq!(err.to_string(), "Not authenticated (cart)");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::FeedUnavailable(FeedError::Status { status: 500 })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::NotAuthenticated(LoginNotice::Required)),
            StatusCode::SEE_OTHER
        );
    }

    #[test]
    fn test_not_authenticated_redirects_to_login() {
        let response = AppError::NotAuthenticated(LoginNotice::Wishlist).into_response();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login?notice=wishlist")
        );
    }

    #[test]
    fn test_feed_details_are_hidden() {
        let err = AppError::FeedUnavailable(FeedError::Status { status: 503 });
        assert!(err.to_string().contains("503"));
        assert_eq!(err.public_message(), FEED_ERROR_MESSAGE);
    }
}
