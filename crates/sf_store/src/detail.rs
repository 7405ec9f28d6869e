use chrono::Local;
use sf_core::{Article, DateFormatStyle};
use url::Url;

/// Everything the detail screen needs about one selected article.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    item: Article,
}

impl ItemDetail {
    pub fn new(item: Article) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &Article {
        &self.item
    }

    pub fn into_item(self) -> Article {
        self.item
    }

    /// Link to the full article; `None` when missing or not a valid URL, in
    /// which case "open full article" does nothing.
    pub fn full_article_url(&self) -> Option<Url> {
        self.item.url.as_deref().and_then(|url| Url::parse(url).ok())
    }

    pub fn authors_line(&self) -> String {
        self.item.authors_formatted()
    }

    pub fn date_line(&self, style: DateFormatStyle) -> String {
        self.item.formatted_date(style, &Local)
    }
}
