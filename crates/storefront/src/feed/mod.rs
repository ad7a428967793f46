//! Remote product feed.
//!
//! # Architecture
//!
//! - [`FeedClient`] fetches one page at a time from a fakestore-style API:
//!   `GET {base}/products?_page={n}&_limit={size}` returning a JSON array
//! - Pages are cached in memory via `moka` so re-fetching page N returns the
//!   same products while the entry lives
//! - [`Catalog`] accumulates fetched pages for the listing and enforces the
//!   one-request-in-flight rule
//!
//! Failures are never retried; the caller decides what to show.

mod catalog;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use catalog::{Catalog, LoadOutcome, SkipReason};

use std::sync::Arc;

use moka::future::Cache;
use shopfront_core::{FeedPage, PageNumber, Product};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::FeedConfig;

/// Errors that can occur when fetching from the product feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot be turned into a products URL.
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// =============================================================================
// FeedClient
// =============================================================================

/// Client for the paged product feed.
#[derive(Clone)]
pub struct FeedClient {
    inner: Arc<FeedClientInner>,
}

struct FeedClientInner {
    client: reqwest::Client,
    products_url: Url,
    page_size: u32,
    cache: Cache<u32, Vec<Product>>,
}

impl FeedClient {
    /// Create a feed client.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::InvalidUrl` if the base URL cannot be extended with
    /// `/products`, or `FeedError::Http` if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let products_url = Url::parse(&format!(
            "{}/products",
            config.base_url.as_str().trim_end_matches('/')
        ))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(FeedClientInner {
                client,
                products_url,
                page_size: config.page_size,
                cache,
            }),
        })
    }

    /// Number of products requested per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Fetch one page of products.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the request fails, times out, returns a
    /// non-success status, or the body is not a product array.
    #[instrument(skip(self), fields(page = %page))]
    pub async fn fetch_page(&self, page: PageNumber) -> Result<FeedPage, FeedError> {
        if let Some(products) = self.inner.cache.get(&page.get()).await {
            debug!(count = products.len(), "Feed page cache hit");
            return Ok(FeedPage::new(page, products));
        }

        let mut url = self.inner.products_url.clone();
        url.query_pairs_mut()
            .append_pair("_page", &page.get().to_string())
            .append_pair("_limit", &self.inner.page_size.to_string());

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Product feed returned non-success status"
            );
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = match serde_json::from_str(&body) {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse product feed response"
                );
                return Err(FeedError::Parse(e));
            }
        };

        debug!(count = products.len(), "Fetched feed page");
        self.inner.cache.insert(page.get(), products.clone()).await;

        Ok(FeedPage::new(page, products))
    }
}
