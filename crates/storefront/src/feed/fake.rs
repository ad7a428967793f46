//! In-process fake of the product feed.
//!
//! Serves `GET /products?_page=&_limit=` from memory on `127.0.0.1:0`. Shared
//! by the unit tests here and the `integration-tests` crate through the
//! `test-support` feature.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use shopfront_core::{Price, Product, ProductId};
use url::Url;

use crate::config::FeedConfig;

/// Product feed served from memory. Clones share counters and switches.
#[derive(Debug, Clone)]
pub struct FakeFeed {
    products: Arc<Vec<Product>>,
    hits: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
}

impl FakeFeed {
    /// Feed with the given products, in order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
            hits: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            delay_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Feed with products `1..=count` titled "Product N", priced at N dollars.
    #[must_use]
    pub fn numbered(count: i32) -> Self {
        Self::new(
            (1..=count)
                .map(|id| {
                    product(
                        id,
                        &format!("Product {id}"),
                        u32::try_from(id).unwrap() * 100,
                    )
                })
                .collect(),
        )
    }

    /// Number of requests received.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Make every following request fail with 500.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Hold every following response for `delay`.
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Serve on an ephemeral port and return a config pointing at it.
    pub async fn serve(&self) -> FeedConfig {
        let app = Router::new()
            .route("/products", get(products_handler))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FeedConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            page_size: 10,
            timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

async fn products_handler(
    State(feed): State<FakeFeed>,
    Query(params): Query<HashMap<String, usize>>,
) -> Response {
    feed.hits.fetch_add(1, Ordering::SeqCst);

    let delay = feed.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if feed.failing.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let page = params.get("_page").copied().unwrap_or(1).max(1);
    let limit = params.get("_limit").copied().unwrap_or(10);
    let items: Vec<Product> = feed
        .products
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();

    Json(items).into_response()
}

/// Build a product.
#[must_use]
pub fn product(id: i32, title: &str, price_cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(price_cents),
        description: format!("Description of {title}"),
        category: "test".to_string(),
        image: format!("https://img.example/{id}.png"),
    }
}
