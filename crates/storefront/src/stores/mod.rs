//! In-memory cart and wishlist stores with write-through persistence.
//!
//! Both stores are constructed explicitly with a [`SharedStorage`] handle and
//! owned by the application state. Every mutating call writes the whole
//! collection back to storage before it returns.
//!
//! The cart keeps one entry per unit and is consolidated into line items only
//! for display. The wishlist rejects duplicates when they are inserted and is
//! never consolidated.
//!
//! [`SharedStorage`]: crate::storage::SharedStorage

pub mod cart;
pub mod wishlist;

pub use cart::CartStore;
pub use wishlist::WishlistStore;
