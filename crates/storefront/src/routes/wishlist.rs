//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use shopfront_core::ProductId;
use tracing::instrument;

use super::products::{ListingParams, ProductView};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAuth, require_login};
use crate::models::{ListingNotice, LoginNotice};
use crate::state::AppState;

/// Add to wishlist form data.
#[derive(Debug, Deserialize)]
pub struct AddToWishlistForm {
    pub product_id: i32,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
}

/// Remove from wishlist form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromWishlistForm {
    pub product_id: i32,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub items: Vec<ProductView>,
    pub authenticated: bool,
}

/// Display the wishlist.
#[instrument(skip(state))]
pub async fn show(_auth: RequireAuth, State(state): State<AppState>) -> impl IntoResponse {
    let items = state.wishlist().items().iter().map(ProductView::from).collect();

    WishlistShowTemplate {
        items,
        authenticated: true,
    }
}

/// Add a product to the wishlist, once.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToWishlistForm>,
) -> Result<Redirect> {
    require_login(&state, LoginNotice::Wishlist)?;

    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let notice = if state.wishlist().add(product) {
        ListingNotice::AddedToWishlist
    } else {
        ListingNotice::AlreadyInWishlist
    };

    let listing = ListingParams {
        q: form.q,
        sort: form.sort,
    };
    Ok(Redirect::to(&listing.url_with_notice(notice, product_id)))
}

/// Remove a product from the wishlist.
#[instrument(skip(state))]
pub async fn remove(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<RemoveFromWishlistForm>,
) -> Redirect {
    let removed = state.wishlist().remove(ProductId::new(form.product_id));
    tracing::info!(product_id = form.product_id, removed, "Removed product from wishlist");

    Redirect::to("/wishlist")
}
