//! Accumulated feed pages for the product listing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopfront_core::{PageNumber, Product, ProductId};
use tracing::instrument;

use super::{FeedClient, FeedError};

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and appended.
    Fetched {
        page: PageNumber,
        /// Number of products on the page.
        count: usize,
    },
    /// Nothing was fetched.
    Ignored(SkipReason),
}

/// Why a load request did not fetch anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is in flight.
    Pending,
    /// The last fetched page was empty.
    Exhausted,
    /// The first page is already loaded.
    AlreadyLoaded,
}

/// Products fetched so far, in page order.
///
/// Pages are requested strictly in increasing order starting at 1, and at
/// most one request is in flight. A failed fetch leaves everything as it was,
/// so the same page is requested again on the next attempt.
pub struct Catalog {
    client: FeedClient,
    state: RwLock<CatalogState>,
    pending: AtomicBool,
}

struct CatalogState {
    products: Vec<Product>,
    next_page: Option<PageNumber>,
    last_page: Option<PageNumber>,
}

/// Clears the pending flag when the fetch finishes, including on error.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Catalog {
    /// Create an empty catalog over `client`.
    #[must_use]
    pub fn new(client: FeedClient) -> Self {
        Self {
            client,
            state: RwLock::new(CatalogState {
                products: Vec::new(),
                next_page: Some(PageNumber::FIRST),
                last_page: None,
            }),
            pending: AtomicBool::new(false),
        }
    }

    /// Snapshot of all fetched products.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Look up a fetched product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.read()
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    /// Whether the feed may have more pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.read().next_page.is_some()
    }

    /// Whether at least the first page has been applied.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read().last_page.is_some()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Fetch the first page unless it is already loaded.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the fetch fails.
    pub async fn ensure_loaded(&self) -> Result<LoadOutcome, FeedError> {
        if self.is_loaded() {
            return Ok(LoadOutcome::Ignored(SkipReason::AlreadyLoaded));
        }
        self.load_more().await
    }

    /// Fetch and append the next page.
    ///
    /// Ignored while another fetch is pending or after the feed ran out.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the fetch fails; accumulated pages are unchanged.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> Result<LoadOutcome, FeedError> {
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            tracing::debug!("Load ignored: fetch already pending");
            return Ok(LoadOutcome::Ignored(SkipReason::Pending));
        };

        let Some(page) = self.next_page() else {
            return Ok(LoadOutcome::Ignored(SkipReason::Exhausted));
        };

        let fetched = self.client.fetch_page(page).await?;
        let count = fetched.products.len();

        {
            let mut state = self.write();
            state.products.extend(fetched.products);
            state.next_page = fetched.next_page;
            state.last_page = Some(page);
        }

        tracing::info!(
            %page,
            count,
            page_size = self.client.page_size(),
            has_more = fetched.next_page.is_some(),
            "Applied feed page"
        );
        Ok(LoadOutcome::Fetched { page, count })
    }

    fn next_page(&self) -> Option<PageNumber> {
        self.read().next_page
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
