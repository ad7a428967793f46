//! Pagination types for the remote product feed.

use core::fmt;
use core::num::NonZeroU32;

use crate::types::Product;

/// A 1-based feed page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page of the feed.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Create a page number. Returns `None` for zero.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        match NonZeroU32::new(page) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }

    /// The raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page after this one, or `None` on overflow.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of products from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    /// The page that was requested.
    pub page: PageNumber,
    pub products: Vec<Product>,
    /// Token for the next page; `None` exactly when this page was empty.
    pub next_page: Option<PageNumber>,
}

impl FeedPage {
    /// Build a page, deriving the next-page token from whether it has products.
    #[must_use]
    pub fn new(page: PageNumber, products: Vec<Product>) -> Self {
        let next_page = if products.is_empty() {
            None
        } else {
            page.next()
        };

        Self {
            page,
            products,
            next_page,
        }
    }

    /// Whether the feed reported more pages after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}
