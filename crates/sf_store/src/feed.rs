use sf_core::{Article, Result};

use crate::detail::ItemDetail;
use crate::store::PaginatedArticleStore;

/// Rows from the end of the list at which the next page is requested.
pub const PREFETCH_DISTANCE: usize = 5;

/// True when displaying `row` of a `len`-row list should trigger a load more.
pub fn is_prefetch_row(row: usize, len: usize) -> bool {
    len >= PREFETCH_DISTANCE && row == len - PREFETCH_DISTANCE
}

/// List-screen facade over a [`PaginatedArticleStore`].
#[derive(Clone)]
pub struct HomeFeed {
    store: PaginatedArticleStore,
}

impl HomeFeed {
    pub fn new(store: PaginatedArticleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PaginatedArticleStore {
        &self.store
    }

    pub async fn items(&self) -> Vec<Article> {
        self.store.items().await
    }

    pub async fn load_initial(&self) -> Result<Vec<Article>> {
        self.store.load_initial(None).await
    }

    pub async fn search(&self, text: impl Into<String>) -> Result<Vec<Article>> {
        self.store.load_initial(Some(text.into())).await
    }

    pub async fn load_more(&self) -> Result<Option<Vec<Article>>> {
        self.store.load_more().await
    }

    /// Called as each row becomes visible; loads the next page when the list
    /// is nearly exhausted.
    pub async fn row_displayed(&self, row: usize) -> Result<Option<Vec<Article>>> {
        if is_prefetch_row(row, self.store.len().await) {
            self.store.load_more().await
        } else {
            Ok(None)
        }
    }

    pub async fn select(&self, row: usize) -> Option<ItemDetail> {
        self.store.get(row).await.map(ItemDetail::new)
    }
}
