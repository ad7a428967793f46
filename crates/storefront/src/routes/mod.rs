//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (?q=&sort=&notice=&product=)
//! POST /products/more          - Load the next feed page
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page (requires auth)
//! GET  /cart/confirm/{id}      - Confirm adding a product (requires auth)
//! POST /cart/add               - Add one unit (requires auth)
//! POST /cart/remove            - Remove all units of a product (requires auth)
//!
//! # Checkout
//! GET  /checkout               - Checkout summary (requires auth)
//! POST /checkout               - Place order
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page (requires auth)
//! POST /wishlist/add           - Add product (requires auth)
//! POST /wishlist/remove        - Remove product (requires auth)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod products;
pub mod wishlist;

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/more", post(products::load_more))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/confirm/{id}", get(cart::confirm))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listing
        .route("/", get(products::index))
        .nest("/products", product_routes())
        // Cart and checkout
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout).post(cart::place_order))
        // Wishlist
        .nest("/wishlist", wishlist_routes())
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Build the full application: routes, health check, static assets and
/// request tracing, bound to `state`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the feed.
async fn health() -> &'static str {
    "ok"
}
