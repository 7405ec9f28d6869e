use serde::{Deserialize, Serialize};

/// One news item as returned by the articles endpoint.
///
/// Every field is optional on the wire; a record missing any of them still
/// decodes and callers substitute defaults when rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response envelope for one page of articles.
///
/// `next` is an opaque cursor: a full request URL chosen by the server that
/// must be requested as-is to get the following page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    #[serde(default)]
    pub results: Option<Vec<Article>>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl ArticlePage {
    pub fn into_results(self) -> Vec<Article> {
        self.results.unwrap_or_default()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
