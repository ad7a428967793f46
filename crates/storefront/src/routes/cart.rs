//! Cart route handlers.
//!
//! The cart is a flat list of units in local storage. Pages show it grouped
//! into line items; removing a line drops every unit of that product.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::{LineItem, ProductId, cart_total, unit_count};
use tracing::instrument;

use super::products::{ListingParams, ProductView};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{RequireAuth, require_login};
use crate::models::{ListingNotice, LoginNotice};
use crate::state::AppState;
use crate::stores::CartStore;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            product: ProductView::from(&line.product),
            quantity: line.quantity,
            line_price: line.subtotal().to_string(),
        }
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        let lines = cart.line_items();
        Self {
            items: lines.iter().map(CartItemView::from).collect(),
            total: cart_total(&lines).to_string(),
            item_count: unit_count(&lines),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
}

impl AddToCartForm {
    fn listing(&self) -> ListingParams {
        ListingParams {
            q: self.q.clone(),
            sort: self.sort.clone(),
        }
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub authenticated: bool,
}

/// Add-to-cart confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirm.html")]
pub struct ConfirmTemplate {
    pub product: ProductView,
    pub q: String,
    pub sort: &'static str,
    pub cancel_url: String,
    pub authenticated: bool,
}

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub authenticated: bool,
}

/// Order placed template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/order_placed.html")]
pub struct OrderPlacedTemplate {
    pub item_count: usize,
    pub total: String,
    pub authenticated: bool,
}

/// Display cart page.
///
/// Reloads the persisted cart first so edits made by another process show up.
#[instrument(skip(state))]
pub async fn show(_auth: RequireAuth, State(state): State<AppState>) -> impl IntoResponse {
    let cart = {
        let mut store = state.cart();
        store.reload();
        CartView::from(&*store)
    };

    CartShowTemplate {
        cart,
        authenticated: true,
    }
}

/// Ask the visitor to confirm adding a product.
#[instrument(skip(state))]
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(listing): Query<ListingParams>,
) -> Result<impl IntoResponse> {
    require_login(&state, LoginNotice::Cart)?;

    let product = state
        .catalog()
        .find(ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ConfirmTemplate {
        product: ProductView::from(&product),
        sort: listing.sort_directive().as_str(),
        cancel_url: listing.url(),
        q: listing.q,
        authenticated: true,
    })
}

/// Add one unit of a product to the cart.
///
/// Anonymous visitors are sent to the login page and nothing is written.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    require_login(&state, LoginNotice::Cart)?;

    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    state.cart().add(product);
    let id = product_id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())]));

    Ok(Redirect::to(
        &form
            .listing()
            .url_with_notice(ListingNotice::AddedToCart, product_id),
    ))
}

/// Remove every unit of a product from the cart.
#[instrument(skip(state))]
pub async fn remove(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Redirect {
    let removed = state
        .cart()
        .remove_all_units_of(ProductId::new(form.product_id));
    tracing::info!(product_id = form.product_id, removed, "Removed product from cart");

    Redirect::to("/cart")
}

/// Display the checkout summary.
#[instrument(skip(state))]
pub async fn checkout(_auth: RequireAuth, State(state): State<AppState>) -> impl IntoResponse {
    let cart = CartView::from(&*state.cart());

    CheckoutTemplate {
        cart,
        authenticated: true,
    }
}

/// Place the order: empty the cart and show a confirmation.
///
/// An empty cart has nothing to order and goes back to the cart page.
#[instrument(skip(state))]
pub async fn place_order(_auth: RequireAuth, State(state): State<AppState>) -> Response {
    let (item_count, total) = {
        let mut cart = state.cart();
        if cart.is_empty() {
            return Redirect::to("/cart").into_response();
        }
        let summary = (cart.len(), cart.total());
        cart.clear();
        summary
    };

    tracing::info!(item_count, %total, "Order placed");
    add_breadcrumb("checkout", "Order placed", None);

    OrderPlacedTemplate {
        item_count,
        total: total.to_string(),
        authenticated: true,
    }
    .into_response()
}
