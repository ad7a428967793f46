//! Cart line items and consolidation.
//!
//! The cart is persisted as a flat list with one entry per unit. Display code
//! never reads that list directly; it goes through [`consolidate`], which
//! groups repeated entries into [`LineItem`]s so quantities and totals always
//! match the number of stored entries.

use std::collections::HashMap;

use crate::types::{Price, Product, ProductId};

/// A product plus the number of units of it in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    /// Price of all units on this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Group flat cart entries into line items.
///
/// Output order is the order in which each product id was first seen. The
/// first entry for an id supplies the product data for the line.
#[must_use]
pub fn consolidate(entries: &[Product]) -> Vec<LineItem> {
    let mut positions: HashMap<ProductId, usize> = HashMap::new();
    let mut items: Vec<LineItem> = Vec::new();

    for product in entries {
        if let Some(item) = positions
            .get(&product.id)
            .and_then(|&position| items.get_mut(position))
        {
            item.quantity += 1;
        } else {
            positions.insert(product.id, items.len());
            items.push(LineItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    items
}

/// Sum of `price * quantity` over all line items.
#[must_use]
pub fn cart_total(items: &[LineItem]) -> Price {
    items.iter().map(LineItem::subtotal).sum()
}

/// Total number of units across all line items.
#[must_use]
pub fn unit_count(items: &[LineItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}
