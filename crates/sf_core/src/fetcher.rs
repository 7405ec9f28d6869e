use async_trait::async_trait;
use crate::types::ArticlePage;
use crate::Result;

#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch one page of articles.
    ///
    /// When `page_url` is given it is requested verbatim and `search` is
    /// ignored; otherwise the first page is built from the configured base URL,
    /// filtered by `search` when it is non-empty.
    async fn fetch_articles(&self, search: Option<&str>, page_url: Option<&str>) -> Result<ArticlePage>;
}
