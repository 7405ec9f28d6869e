use sf_core::{Article, ArticleFetcher, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorePhase {
    /// No successful load yet.
    #[default]
    Empty,
    Loaded,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Drop articles whose id was already seen, whether earlier in the list
    /// or earlier in the same page. Articles without an id are always kept.
    pub dedupe_by_id: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    articles: Vec<Article>,
    next_page: Option<String>,
    search: Option<String>,
    phase: StorePhase,
}

/// Accumulates paginated article results for one browsing session.
///
/// All reads and writes go through a single lock; it is released while a
/// request is in flight, so overlapping calls are not serialized and the last
/// one to complete wins. A failed load leaves the list, the cursor and the
/// search term exactly as they were.
#[derive(Clone)]
pub struct PaginatedArticleStore {
    fetcher: Arc<dyn ArticleFetcher>,
    state: Arc<RwLock<StoreState>>,
    options: StoreOptions,
}

impl PaginatedArticleStore {
    pub fn new(fetcher: Arc<dyn ArticleFetcher>) -> Self {
        Self::with_state(fetcher, Vec::new(), None)
    }

    /// Starts from already loaded articles and a known cursor.
    pub fn with_state(
        fetcher: Arc<dyn ArticleFetcher>,
        articles: Vec<Article>,
        next_page: Option<String>,
    ) -> Self {
        let phase = if articles.is_empty() && next_page.is_none() {
            StorePhase::Empty
        } else {
            StorePhase::Loaded
        };

        Self {
            fetcher,
            state: Arc::new(RwLock::new(StoreState {
                articles,
                next_page,
                search: None,
                phase,
            })),
            options: StoreOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Starts a new result set, optionally filtered by `text`, and returns it.
    pub async fn load_initial(&self, text: Option<String>) -> Result<Vec<Article>> {
        debug!("Initial load (search: {:?})", text);
        let page = match self.fetcher.fetch_articles(text.as_deref(), None).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Initial load failed (search: {:?}): {}", text, e);
                return Err(e);
            }
        };

        let next = page.next.clone();
        let mut articles = page.into_results();
        self.drop_duplicates(HashSet::new(), &mut articles);

        let mut state = self.state.write().await;
        state.articles = articles;
        state.next_page = next;
        state.search = text;
        state.phase = StorePhase::Loaded;
        debug!(
            "Loaded {} articles (more: {})",
            state.articles.len(),
            state.next_page.is_some()
        );

        Ok(state.articles.clone())
    }

    /// Appends the next page and returns only the new articles.
    ///
    /// Returns `Ok(None)` without touching the network when there is no cursor.
    pub async fn load_more(&self) -> Result<Option<Vec<Article>>> {
        let (cursor, search) = {
            let state = self.state.read().await;
            match &state.next_page {
                Some(cursor) => (cursor.clone(), state.search.clone()),
                None => {
                    debug!("No next page, nothing to load");
                    return Ok(None);
                }
            }
        };

        debug!("Loading more from {}", cursor);
        let page = match self
            .fetcher
            .fetch_articles(search.as_deref(), Some(&cursor))
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("Load more failed ({}): {}", cursor, e);
                return Err(e);
            }
        };

        let next = page.next.clone();
        let mut new_articles = page.into_results();

        let mut state = self.state.write().await;
        if self.options.dedupe_by_id {
            let seen = state.articles.iter().filter_map(|a| a.id).collect();
            self.drop_duplicates(seen, &mut new_articles);
        }

        state.articles.extend(new_articles.iter().cloned());
        state.next_page = next;
        state.phase = StorePhase::Loaded;
        debug!(
            "Appended {} articles, {} total (more: {})",
            new_articles.len(),
            state.articles.len(),
            state.next_page.is_some()
        );

        Ok(Some(new_articles))
    }

    fn drop_duplicates(&self, mut seen: HashSet<i64>, articles: &mut Vec<Article>) {
        if !self.options.dedupe_by_id {
            return;
        }
        let before = articles.len();
        articles.retain(|a| a.id.map_or(true, |id| seen.insert(id)));
        if articles.len() < before {
            debug!("Dropped {} duplicate articles", before - articles.len());
        }
    }

    pub async fn items(&self) -> Vec<Article> {
        self.state.read().await.articles.clone()
    }

    pub async fn get(&self, index: usize) -> Option<Article> {
        self.state.read().await.articles.get(index).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.articles.is_empty()
    }

    pub async fn next_page(&self) -> Option<String> {
        self.state.read().await.next_page.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.next_page.is_some()
    }

    pub async fn search_term(&self) -> Option<String> {
        self.state.read().await.search.clone()
    }

    pub async fn phase(&self) -> StorePhase {
        self.state.read().await.phase
    }
}
