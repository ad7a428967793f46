//! End-to-end tests for the storefront routes.
//!
//! Each test starts its own fake feed and app, so they are independent.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use shopfront_integration_tests::{FakeFeed, TOKEN, TestApp, product};
use shopfront_storefront::storage::{FileStorage, SharedStorage, keys};

fn stored_ids(storage: &SharedStorage, key: &str) -> Vec<i64> {
    let raw = storage.get(key).unwrap_or_else(|| "[]".to_string());
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .collect()
}

fn shoes_and_hats() -> FakeFeed {
    FakeFeed::new(vec![
        product(1, "Red Shoe", 5000),
        product(2, "Blue Hat", 2000),
    ])
}

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn test_protected_pages_redirect_anonymous_visitors() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;

    for path in ["/cart", "/wishlist", "/checkout"] {
        let response = app.get(path).await;
        assert!(
            response.redirects_to("/login?notice=required"),
            "{path}: {response:?}"
        );
        assert!(!response.body.contains("Cart:"));
        assert!(!response.body.contains("Wishlist"));
    }
}

#[tokio::test]
async fn test_login_page_shows_notice() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;

    let response = app.get("/login?notice=cart").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .body
            .contains("Please login to add items to your cart.")
    );
}

#[tokio::test]
async fn test_login_page_ignores_unknown_notice() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;

    let response = app.get("/login?notice=x").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Login"));
    assert!(!response.body.contains("Please login"));
}

#[tokio::test]
async fn test_login_with_wrong_password_shows_error() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;

    let response = app
        .post_form("/login", "username=user&password=wrong")
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid username or password"));
    assert!(app.storage.get(keys::AUTH_TOKEN).is_none());
}

#[tokio::test]
async fn test_login_then_logout() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;

    app.login().await;
    assert_eq!(app.storage.get(keys::AUTH_TOKEN).as_deref(), Some(TOKEN));

    // Logged-in visitors skip the login page
    assert!(app.get("/login").await.redirects_to("/"));
    assert_eq!(app.get("/cart").await.status, StatusCode::OK);

    assert!(app.post_form("/logout", "").await.redirects_to("/"));
    assert!(app.storage.get(keys::AUTH_TOKEN).is_none());
    assert_eq!(app.get("/login").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_add_to_cart_is_blocked() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.get("/").await;

    let response = app.post_form("/cart/add", "product_id=1").await;
    assert!(response.redirects_to("/login?notice=cart"));

    let confirm = app.get("/cart/confirm/1").await;
    assert!(confirm.redirects_to("/login?notice=cart"));

    assert!(app.storage.get(keys::CART).is_none());
}

#[tokio::test]
async fn test_anonymous_add_to_wishlist_is_blocked() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.get("/").await;

    let response = app.post_form("/wishlist/add", "product_id=2").await;
    assert!(response.redirects_to("/login?notice=wishlist"));
    assert!(app.storage.get(keys::WISHLIST).is_none());
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_groups_units_and_removes_all() {
    let app = TestApp::spawn(FakeFeed::numbered(5)).await;
    app.login().await;
    app.get("/").await;

    let first = app.post_form("/cart/add", "product_id=1").await;
    assert!(first.redirects_to("/?notice=added_to_cart&product=1"));
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=2").await;

    assert_eq!(stored_ids(&app.storage, keys::CART), vec![1, 1, 2]);

    let cart = app.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Quantity: 2"));
    assert!(cart.body.contains("Quantity: 1"));
    assert!(cart.body.contains("Total: $4.00"));

    let removed = app.post_form("/cart/remove", "product_id=1").await;
    assert!(removed.redirects_to("/cart"));
    assert_eq!(stored_ids(&app.storage, keys::CART), vec![2]);

    let cart = app.get("/cart").await;
    assert!(!cart.body.contains(r#"data-product-id="1""#));
    assert!(cart.body.contains("Total: $2.00"));
}

#[tokio::test]
async fn test_add_to_cart_keeps_listing_params() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.login().await;
    app.get("/").await;

    let response = app
        .post_form("/cart/add", "product_id=2&q=hat&sort=highest")
        .await;
    assert!(
        response.redirects_to("/?q=hat&sort=highest&notice=added_to_cart&product=2"),
        "{response:?}"
    );

    let listing = app
        .get("/?q=hat&sort=highest&notice=added_to_cart&product=2")
        .await;
    assert!(listing.body.contains("Blue Hat has been added to your cart!"));
}

#[tokio::test]
async fn test_confirm_page() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.login().await;
    app.get("/").await;

    let confirm = app.get("/cart/confirm/1").await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(
        confirm
            .body
            .contains("Are you sure about adding <strong>Red Shoe</strong> to your cart?")
    );

    // Confirming nothing yet means nothing was added
    assert!(app.storage.get(keys::CART).is_none());

    let missing = app.get("/cart/confirm/99").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_cart() {
    let app = TestApp::spawn(FakeFeed::numbered(3)).await;
    app.login().await;

    let cart = app.get("/cart").await;
    assert!(cart.body.contains("Cart is empty"));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.login().await;
    app.get("/").await;
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=2").await;

    let summary = app.get("/checkout").await;
    assert_eq!(summary.status, StatusCode::OK);
    assert!(summary.body.contains("total $70.00"));

    let placed = app.post_form("/checkout", "").await;
    assert_eq!(placed.status, StatusCode::OK);
    assert!(placed.body.contains("Thank you!"));
    assert!(stored_ids(&app.storage, keys::CART).is_empty());

    // Nothing left to order
    assert!(app.post_form("/checkout", "").await.redirects_to("/cart"));
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_add_is_idempotent() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.login().await;
    app.get("/").await;

    let first = app.post_form("/wishlist/add", "product_id=1").await;
    assert!(first.redirects_to("/?notice=added_to_wishlist&product=1"));

    let second = app.post_form("/wishlist/add", "product_id=1").await;
    assert!(second.redirects_to("/?notice=already_in_wishlist&product=1"));

    assert_eq!(stored_ids(&app.storage, keys::WISHLIST), vec![1]);

    let page = app.get("/wishlist").await;
    assert!(page.body.contains("Red Shoe"));
    assert!(page.body.contains("Remove from Wishlist"));
}

#[tokio::test]
async fn test_wishlist_remove() {
    let app = TestApp::spawn(shoes_and_hats()).await;
    app.login().await;
    app.get("/").await;
    app.post_form("/wishlist/add", "product_id=1").await;

    let removed = app.post_form("/wishlist/remove", "product_id=1").await;
    assert!(removed.redirects_to("/wishlist"));
    assert!(stored_ids(&app.storage, keys::WISHLIST).is_empty());

    // Second removal changes nothing
    app.post_form("/wishlist/remove", "product_id=1").await;
    let page = app.get("/wishlist").await;
    assert!(page.body.contains("No items in your wishlist!"));
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_listing_filters_by_title() {
    let app = TestApp::spawn(shoes_and_hats()).await;

    let response = app.get("/?q=sho").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Red Shoe"));
    assert!(!response.body.contains("Blue Hat"));

    let none = app.get("/?q=zzz").await;
    assert!(none.body.contains("No products found!"));
    assert!(!none.body.contains("See more"));
}

#[tokio::test]
async fn test_listing_sorts_by_price() {
    let app = TestApp::spawn(shoes_and_hats()).await;

    let lowest = app.get("/?sort=lowest").await.body;
    assert!(lowest.find("Blue Hat").unwrap() < lowest.find("Red Shoe").unwrap());

    let highest = app.get("/?sort=highest").await.body;
    assert!(highest.find("Red Shoe").unwrap() < highest.find("Blue Hat").unwrap());

    // Unknown sort keeps feed order
    let unsorted = app.get("/?sort=sideways").await.body;
    assert!(unsorted.find("Red Shoe").unwrap() < unsorted.find("Blue Hat").unwrap());
}

#[tokio::test]
async fn test_load_more_disappears_after_empty_page() {
    let app = TestApp::spawn(FakeFeed::numbered(10)).await;

    let first = app.get("/").await;
    assert!(first.body.contains("See more"));
    assert_eq!(app.feed.hits(), 1);

    let more = app.post_form("/products/more", "").await;
    assert!(more.redirects_to("/"));
    assert_eq!(app.feed.hits(), 2);

    let after = app.get("/").await;
    assert!(!after.body.contains("See more"));
    assert_eq!(app.state.catalog().products().len(), 10);

    // The feed is exhausted; further requests fetch nothing
    app.post_form("/products/more", "").await;
    assert_eq!(app.feed.hits(), 2);
}

#[tokio::test]
async fn test_load_more_appends_next_page() {
    let app = TestApp::spawn(FakeFeed::numbered(15)).await;
    app.get("/").await;

    let more = app.post_form("/products/more", "q=product&sort=lowest").await;
    assert!(more.redirects_to("/?q=product&sort=lowest"));

    let listing = app.get("/").await;
    assert!(listing.body.contains(r#"data-product-id="15""#));
    assert!(listing.body.contains("See more"));
}

#[tokio::test]
async fn test_listing_ignores_malformed_notice() {
    let app = TestApp::spawn(shoes_and_hats()).await;

    for path in [
        "/?notice=bogus",
        "/?notice=added_to_cart",
        "/?notice=added_to_cart&product=abc",
        "/?notice=bogus&product=1",
    ] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert!(response.body.contains("Red Shoe"), "{path}");
        assert!(!response.body.contains("toast"), "{path}");
    }

    let response = app.get("/?notice=added_to_cart&product=1").await;
    assert!(response.body.contains("Red Shoe has been added to your cart!"));
}

#[tokio::test]
async fn test_listing_uses_loaded_pages_while_fetch_is_pending() {
    let app = TestApp::spawn(FakeFeed::numbered(15)).await;
    app.get("/").await;
    assert_eq!(app.feed.hits(), 1);

    app.feed.set_delay(Duration::from_millis(300));
    let (more, listing) = tokio::join!(app.post_form("/products/more", ""), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.get("/?q=product%201&sort=lowest").await
    });

    assert_eq!(listing.status, StatusCode::OK);
    let body = &listing.body;
    let first = body.find(r#"data-product-id="1""#).unwrap();
    let tenth = body.find(r#"data-product-id="10""#).unwrap();
    assert!(first < tenth);
    for id in 2..=9 {
        assert!(!body.contains(&format!(r#"data-product-id="{id}""#)));
    }
    for id in 11..=15 {
        assert!(!body.contains(&format!(r#"data-product-id="{id}""#)));
    }
    assert!(body.contains("See more"));
    assert!(body.contains("disabled"));
    assert!(body.contains(r#"aria-label="Loading""#));

    assert!(more.redirects_to("/"));
    assert_eq!(app.feed.hits(), 2);
    assert_eq!(app.state.catalog().products().len(), 15);
    assert!(!app.state.catalog().is_pending());
}

#[tokio::test]
async fn test_feed_failure_shows_error_page() {
    let feed = FakeFeed::numbered(5);
    feed.fail();
    let app = TestApp::spawn(feed).await;

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Error while fetching data!"));
    assert!(!app.state.catalog().is_loaded());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_state_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let feed = shoes_and_hats();

    {
        let storage: SharedStorage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let app = TestApp::spawn_with_storage(feed.clone(), storage).await;
        app.login().await;
        app.get("/").await;
        app.post_form("/cart/add", "product_id=2").await;
        app.post_form("/wishlist/add", "product_id=1").await;
    }

    let storage: SharedStorage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let app = TestApp::spawn_with_storage(feed, storage).await;

    let cart = app.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Blue Hat"));

    let wishlist = app.get("/wishlist").await;
    assert!(wishlist.body.contains("Red Shoe"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn(FakeFeed::numbered(1)).await;
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}
