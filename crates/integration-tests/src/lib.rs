//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Nothing external is needed: every test serves a [`FakeFeed`] on
//! `127.0.0.1:0` and drives the storefront router in-process with
//! `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use shopfront_storefront::config::{LoginConfig, StorefrontConfig};
use shopfront_storefront::routes;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::{MemoryStorage, SharedStorage, StorageBackend};
use tower::ServiceExt;

pub use shopfront_storefront::feed::fake::{FakeFeed, product};

/// Username accepted by test apps.
pub const USERNAME: &str = "user";
/// Password accepted by test apps.
pub const PASSWORD: &str = "123456";
/// Token issued on login in test apps.
pub const TOKEN: &str = "test-token";

// =============================================================================
// Test app
// =============================================================================

/// A storefront wired to a fake feed and in-memory storage.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub storage: SharedStorage,
    pub feed: FakeFeed,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Whether this is a redirect to exactly `target`.
    #[must_use]
    pub fn redirects_to(&self, target: &str) -> bool {
        self.status.is_redirection() && self.location.as_deref() == Some(target)
    }
}

impl TestApp {
    /// Start an app over `feed` with fresh in-memory storage.
    pub async fn spawn(feed: FakeFeed) -> Self {
        Self::spawn_with_storage(feed, Arc::new(MemoryStorage::new())).await
    }

    /// Start an app over `feed` and the given storage.
    pub async fn spawn_with_storage(feed: FakeFeed, storage: SharedStorage) -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            storage: StorageBackend::Memory,
            feed: feed.serve().await,
            login: LoginConfig {
                username: USERNAME.to_string(),
                password: SecretString::from(PASSWORD),
                token: SecretString::from(TOKEN),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(&config, Arc::clone(&storage)).unwrap();
        let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/static");
        let router = routes::app(state.clone(), &static_dir);

        Self {
            router,
            state,
            storage,
            feed,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Log in with the test credentials.
    pub async fn login(&self) {
        let response = self
            .post_form("/login", &format!("username={USERNAME}&password={PASSWORD}"))
            .await;
        assert!(response.redirects_to("/"), "login failed: {response:?}");
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
