//! Product records as served by the remote feed.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product from the remote feed.
///
/// Products are immutable once fetched; the stores persist exactly what the
/// feed returned. Extra fields in the feed payload (such as `rating`) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}
