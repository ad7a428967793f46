//! Product listing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use shopfront_core::{Product, ProductId, SortDirective, view};
use tracing::instrument;

use crate::error::Result;
use crate::feed::LoadOutcome;
use crate::filters;
use crate::models::ListingNotice;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Search text and sort order, carried through forms so the visitor lands
/// back on the same listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
}

impl ListingParams {
    #[must_use]
    pub fn sort_directive(&self) -> SortDirective {
        SortDirective::from_query(Some(&self.sort))
    }

    /// Listing URL preserving these params.
    #[must_use]
    pub fn url(&self) -> String {
        listing_url(&self.q, self.sort_directive(), None)
    }

    /// Listing URL preserving these params and announcing `notice`.
    #[must_use]
    pub fn url_with_notice(&self, notice: ListingNotice, product_id: ProductId) -> String {
        listing_url(&self.q, self.sort_directive(), Some((notice, product_id)))
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
    pub notice: Option<String>,
    pub product: Option<String>,
}

impl ListingQuery {
    /// Notice and the product it names, if both parse.
    #[must_use]
    pub fn notice(&self) -> Option<(ListingNotice, i32)> {
        let notice = ListingNotice::from_query(self.notice.as_deref())?;
        let product = self.product.as_deref()?.parse().ok()?;
        Some((notice, product))
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub query: String,
    pub sort: String,
    pub show_load_more: bool,
    pub loading: bool,
    pub notice: Option<String>,
    pub authenticated: bool,
}

/// Build `/` with the given search, sort and notice.
///
/// Empty values are left out, so the plain listing is just `/`.
#[must_use]
pub fn listing_url(
    query: &str,
    sort: SortDirective,
    notice: Option<(ListingNotice, ProductId)>,
) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !query.is_empty() {
        pairs.push(("q", urlencoding::encode(query).into_owned()));
    }
    if sort != SortDirective::None {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    if let Some((notice, product_id)) = notice {
        pairs.push(("notice", notice.as_str().to_string()));
        pairs.push(("product", product_id.to_string()));
    }

    if pairs.is_empty() {
        return "/".to_string();
    }

    let query_string = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("/?{query_string}")
}

/// Display the product listing.
///
/// Fetches the first feed page on the first visit; afterwards the listing is
/// recomputed from the pages already loaded.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    catalog.ensure_loaded().await?;

    let sort = SortDirective::from_query(query.sort.as_deref());
    let visible = view(&catalog.products(), &query.q, sort);

    let notice = query.notice().map(|(notice, id)| {
        let title = catalog
            .find(ProductId::new(id))
            .map_or_else(|| format!("Product #{id}"), |product| product.title);
        notice.message(&title)
    });

    Ok(ProductsIndexTemplate {
        show_load_more: !visible.is_empty() && catalog.has_more(),
        products: visible.iter().map(ProductView::from).collect(),
        query: query.q,
        sort: sort.as_str().to_string(),
        loading: catalog.is_pending(),
        notice,
        authenticated: state.auth().is_authenticated(),
    })
}

/// Load the next feed page and go back to the listing.
#[instrument(skip(state))]
pub async fn load_more(
    State(state): State<AppState>,
    Form(params): Form<ListingParams>,
) -> Result<Redirect> {
    match state.catalog().load_more().await? {
        LoadOutcome::Fetched { page, count } => {
            tracing::debug!(%page, count, "Loaded more products");
        }
        LoadOutcome::Ignored(reason) => {
            tracing::debug!(?reason, "Load more ignored");
        }
    }

    Ok(Redirect::to(&params.url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_plain() {
        assert_eq!(listing_url("", SortDirective::None, None), "/");
    }

    #[test]
    fn test_listing_url_encodes_query() {
        assert_eq!(
            listing_url("red shoe&co", SortDirective::LowestFirst, None),
            "/?q=red%20shoe%26co&sort=lowest"
        );
    }

    #[test]
    fn test_listing_url_with_notice() {
        let url = listing_url(
            "",
            SortDirective::HighestFirst,
            Some((ListingNotice::AddedToCart, ProductId::new(7))),
        );
        assert_eq!(url, "/?sort=highest&notice=added_to_cart&product=7");
    }

    #[test]
    fn test_listing_params_ignore_unknown_sort() {
        let params = ListingParams {
            q: "hat".to_string(),
            sort: "random".to_string(),
        };
        assert_eq!(params.sort_directive(), SortDirective::None);
        assert_eq!(params.url(), "/?q=hat");
    }

    #[test]
    fn test_listing_query_notice_needs_known_notice_and_numeric_product() {
        let query = |notice: &str, product: &str| ListingQuery {
            notice: Some(notice.to_string()),
            product: Some(product.to_string()),
            ..ListingQuery::default()
        };

        assert_eq!(
            query("added_to_wishlist", "3").notice(),
            Some((ListingNotice::AddedToWishlist, 3))
        );
        assert_eq!(query("bogus", "3").notice(), None);
        assert_eq!(query("added_to_cart", "three").notice(), None);
        assert_eq!(ListingQuery::default().notice(), None);
    }
}
