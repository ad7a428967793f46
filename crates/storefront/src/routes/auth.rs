//! Authentication route handlers.
//!
//! Handles login and logout against the configured credential check. The
//! token lives in local storage, so logging in here logs in every tab.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::models::LoginNotice;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub notice: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub notice: Option<&'static str>,
    pub error: Option<String>,
    pub username: String,
    pub authenticated: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page, or go home if already logged in.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Response {
    if state.auth().is_authenticated() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        notice: LoginNotice::from_query(query.notice.as_deref()).map(LoginNotice::message),
        error: None,
        username: String::new(),
        authenticated: false,
    }
    .into_response()
}

/// Handle login form submission.
///
/// On success the issued token is stored and the visitor goes to the
/// listing; on failure the form is shown again with an error.
#[instrument(skip(state), fields(username = %form.username))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state
        .authenticator()
        .authenticate(&form.username, &form.password)
    {
        Ok(token) => {
            state.auth().sign_in(&token);
            set_sentry_user(&form.username);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            (
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    notice: None,
                    error: Some(e.to_string()),
                    username: form.username,
                    authenticated: false,
                },
            )
                .into_response()
        }
    }
}

/// Handle logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.auth().sign_out();
    clear_sentry_user();
    Redirect::to("/")
}
