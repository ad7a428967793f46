//! Wishlist store.

use shopfront_core::{Product, ProductId};

use crate::storage::{SharedStorage, keys, load_json, save_json};

/// A set of distinct products keyed by id, in insertion order.
pub struct WishlistStore {
    storage: SharedStorage,
    items: Vec<Product>,
}

impl WishlistStore {
    /// Create the store, reading the persisted wishlist once.
    #[must_use]
    pub fn hydrate(storage: SharedStorage) -> Self {
        let items = load_json(storage.as_ref(), keys::WISHLIST).unwrap_or_default();
        Self { storage, items }
    }

    /// Add a product unless one with the same id is already present.
    ///
    /// Returns `true` if the wishlist changed.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }

        tracing::debug!(product_id = %product.id, "Adding product to wishlist");
        self.items.push(product);
        self.persist();
        true
    }

    /// Remove the product with `product_id`. Returns `true` if it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|product| product.id != product_id);
        let removed = self.items.len() != before;

        self.persist();
        removed
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|product| product.id == product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        save_json(self.storage.as_ref(), keys::WISHLIST, &self.items);
    }
}
