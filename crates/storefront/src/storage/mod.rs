//! Persistent key-value storage.
//!
//! The storefront keeps all user state (cart, wishlist, auth token) in a small
//! local key-value store mapping string keys to JSON text, the same shape as
//! browser `localStorage`.
//!
//! # Backends
//!
//! - [`FileStorage`] - durable, one JSON file under the data directory
//! - [`MemoryStorage`] - process-local, lost on restart
//! - [`DetachedStorage`] - no storage context at all; reads are empty, writes vanish
//!
//! Which backend is used is decided once at startup ([`StorageBackend`]) and
//! injected into the stores as a [`SharedStorage`]. There is no locking across
//! processes: two writers to the same file simply overwrite each other.

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::{DetachedStorage, MemoryStorage};

/// Storage keys for persisted collections.
pub mod keys {
    /// Flat list of cart entries, one per unit.
    pub const CART: &str = "cart";

    /// Deduplicated list of wishlist products.
    pub const WISHLIST: &str = "wishlist";

    /// Opaque token whose presence means "logged in".
    pub const AUTH_TOKEN: &str = "authToken";
}

/// Errors from the file backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or creating the storage file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the entries for writing failed.
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A synchronous string-to-string store.
///
/// Callers handle JSON encoding; see [`load_json`] and [`save_json`].
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str);

    /// Delete `key`. Missing keys are ignored.
    fn remove(&self, key: &str);
}

/// Storage handle shared by the stores and the auth gate.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Which storage backend to open at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Durable JSON file in the given directory.
    File(PathBuf),
    /// In-process map.
    Memory,
    /// Storage unavailable.
    Detached,
}

impl StorageBackend {
    /// Whether this backend can hold any data.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

/// Open the configured backend.
///
/// # Errors
///
/// Returns `StorageError` if the file backend cannot read or create its file.
/// A corrupt file is not an error; the store starts empty.
pub fn open(backend: &StorageBackend) -> Result<SharedStorage, StorageError> {
    let storage: SharedStorage = match backend {
        StorageBackend::File(dir) => {
            let file = FileStorage::open(dir)?;
            tracing::info!(path = %file.path().display(), "Using file storage");
            Arc::new(file)
        }
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::Detached => {
            tracing::warn!("Local storage disabled; cart, wishlist and login will not persist");
            Arc::new(DetachedStorage)
        }
    };
    Ok(storage)
}

/// Open the configured backend, falling back to detached storage.
///
/// Storage is never fatal: if the file backend cannot be opened the error is
/// logged and the storefront runs without persistence.
pub fn open_or_detached(backend: &StorageBackend) -> SharedStorage {
    open(backend).unwrap_or_else(|e| {
        tracing::error!(backend = ?backend, error = %e, "Failed to open local storage");
        tracing::warn!("Local storage disabled; cart, wishlist and login will not persist");
        Arc::new(DetachedStorage)
    })
}

/// Read and decode a JSON value.
///
/// A missing key and an undecodable value both read as `None`; the latter is
/// logged so corrupt entries are visible without breaking the page.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring undecodable stored value");
            None
        }
    }
}

/// Encode and write a JSON value.
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => tracing::error!(key, error = %e, "Failed to encode value for storage"),
    }
}
