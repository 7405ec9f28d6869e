pub mod detail;
pub mod feed;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use detail::ItemDetail;
pub use feed::{is_prefetch_row, HomeFeed, PREFETCH_DISTANCE};
pub use store::{PaginatedArticleStore, StoreOptions, StorePhase};

pub mod prelude {
    pub use super::{HomeFeed, ItemDetail, PaginatedArticleStore, StoreOptions};
    pub use sf_core::{Article, ArticleFetcher, Error, Result};
}
