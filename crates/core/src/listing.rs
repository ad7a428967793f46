//! Filter/sort pipeline for the product listing.

use crate::types::{Product, SortDirective};

/// Produce the listing view over all fetched products.
///
/// Keeps products whose title contains `query` (case-insensitive; an empty
/// query keeps everything), then applies `sort`. Both sorts are stable, so
/// equally priced products keep their feed order.
#[must_use]
pub fn view(products: &[Product], query: &str, sort: SortDirective) -> Vec<Product> {
    let needle = query.to_lowercase();

    let mut visible: Vec<Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortDirective::None => {}
        SortDirective::LowestFirst => visible.sort_by(|a, b| a.price.cmp(&b.price)),
        SortDirective::HighestFirst => visible.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    visible
}
