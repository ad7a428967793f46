//! Cart store.

use shopfront_core::{LineItem, Price, Product, ProductId, cart_total, consolidate};

use crate::storage::{SharedStorage, keys, load_json, save_json};

/// The shopping cart as a flat list of units.
///
/// Adding the same product twice stores two entries; [`CartStore::line_items`]
/// folds them into one line with quantity 2.
pub struct CartStore {
    storage: SharedStorage,
    entries: Vec<Product>,
}

impl CartStore {
    /// Create the store and load whatever cart is persisted.
    #[must_use]
    pub fn open(storage: SharedStorage) -> Self {
        let mut store = Self {
            storage,
            entries: Vec::new(),
        };
        store.reload();
        store
    }

    /// Append one unit of `product`.
    pub fn add(&mut self, product: Product) {
        tracing::debug!(product_id = %product.id, "Adding product to cart");
        self.entries.push(product);
        self.persist();
    }

    /// Remove every unit of the given product. Returns how many were removed.
    pub fn remove_all_units_of(&mut self, product_id: ProductId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|product| product.id != product_id);
        let removed = before - self.entries.len();

        tracing::debug!(%product_id, removed, "Removed product from cart");
        self.persist();
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Replace the in-memory cart with the persisted one (empty if absent).
    pub fn reload(&mut self) {
        self.entries = load_json(self.storage.as_ref(), keys::CART).unwrap_or_default();
    }

    /// Flat entries, one per unit, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Entries grouped into line items in first-added order.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        consolidate(&self.entries)
    }

    /// Total price of the cart.
    #[must_use]
    pub fn total(&self) -> Price {
        cart_total(&self.line_items())
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        save_json(self.storage.as_ref(), keys::CART, &self.entries);
    }
}
