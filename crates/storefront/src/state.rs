//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::StorefrontConfig;
use crate::feed::{Catalog, FeedClient, FeedError};
use crate::services::auth::{AuthGate, Authenticator, StaticCredentials};
use crate::storage::SharedStorage;
use crate::stores::{CartStore, WishlistStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is the only owner of the
/// catalog, the stores and the auth gate; handlers reach them through the
/// accessors below.
///
/// Store guards must be dropped before the handler awaits anything.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    auth: AuthGate,
    authenticator: Box<dyn Authenticator>,
}

impl AppState {
    /// Create a new application state over an opened storage backend.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the feed client cannot be built from the config.
    pub fn new(config: &StorefrontConfig, storage: SharedStorage) -> Result<Self, FeedError> {
        let authenticator = Box::new(StaticCredentials::new(config.login.clone()));
        Self::with_authenticator(config, storage, authenticator)
    }

    /// Like [`AppState::new`] with a custom credential check.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the feed client cannot be built from the config.
    pub fn with_authenticator(
        config: &StorefrontConfig,
        storage: SharedStorage,
        authenticator: Box<dyn Authenticator>,
    ) -> Result<Self, FeedError> {
        let catalog = Catalog::new(FeedClient::new(&config.feed)?);
        let cart = CartStore::open(Arc::clone(&storage));
        let wishlist = WishlistStore::hydrate(Arc::clone(&storage));
        let auth = AuthGate::new(storage);

        tracing::info!(
            cart_entries = cart.len(),
            wishlist_items = wishlist.len(),
            authenticated = auth.is_authenticated(),
            "Application state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                cart: Mutex::new(cart),
                wishlist: Mutex::new(wishlist),
                auth,
                authenticator,
            }),
        })
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart store.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the wishlist store.
    pub fn wishlist(&self) -> MutexGuard<'_, WishlistStore> {
        self.inner
            .wishlist
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }

    #[must_use]
    pub fn authenticator(&self) -> &dyn Authenticator {
        self.inner.authenticator.as_ref()
    }
}
