use async_trait::async_trait;
use sf_core::{Article, ArticleFetcher, ArticlePage, Error, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FetchCall {
    pub search: Option<String>,
    pub page_url: Option<String>,
}

/// Scripted fetcher: replies with queued results in order and records every call.
/// Running out of scripted replies yields `Error::NoData`.
#[derive(Default)]
pub(crate) struct MockFetcher {
    replies: Mutex<VecDeque<Result<ArticlePage>>>,
    calls: Mutex<Vec<FetchCall>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: ArticlePage) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn push_error(&self, error: Error) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<FetchCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ArticleFetcher for MockFetcher {
    async fn fetch_articles(&self, search: Option<&str>, page_url: Option<&str>) -> Result<ArticlePage> {
        self.calls.lock().unwrap().push(FetchCall {
            search: search.map(str::to_string),
            page_url: page_url.map(str::to_string),
        });
        tokio::task::yield_now().await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(Error::NoData))
    }
}

pub(crate) fn article(id: i64, title: &str) -> Article {
    Article {
        id: Some(id),
        title: Some(title.to_string()),
        summary: Some(format!("Summary {}", id)),
        url: Some(format!("https://news.example.com/{}", id)),
        published_at: Some("2024-01-01T00:00:00Z".to_string()),
        ..Default::default()
    }
}

pub(crate) fn page(results: Vec<Article>, next: Option<&str>) -> ArticlePage {
    ArticlePage {
        count: Some(results.len() as i64),
        results: Some(results),
        previous: None,
        next: next.map(str::to_string),
    }
}

pub(crate) fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(Article::title_or_default).collect()
}
