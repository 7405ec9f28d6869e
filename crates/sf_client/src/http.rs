use async_trait::async_trait;
use sf_core::{ArticleFetcher, ArticlePage, ClientConfig, Error, Result};
use tracing::debug;
use url::Url;

/// [`ArticleFetcher`] backed by the Spaceflight News REST API.
///
/// Holds an explicitly constructed `reqwest::Client`, so several fetchers can
/// share one connection pool and tests can point it at a local server.
#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpArticleFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// First-page URL: base URL plus ordering, limit and an optional search term.
    pub fn first_page_url(&self, search: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "{}: not a hierarchical URL",
                self.config.base_url
            )));
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ordering", &self.config.ordering);
            query.append_pair("limit", &self.config.page_limit.to_string());
            if let Some(term) = search.filter(|term| !term.is_empty()) {
                query.append_pair("search", term);
            }
        }

        Ok(url)
    }

    fn request_url(&self, search: Option<&str>, page_url: Option<&str>) -> Result<Url> {
        match page_url {
            Some(page) => {
                Url::parse(page).map_err(|e| Error::InvalidUrl(format!("{}: {}", page, e)))
            }
            None => self.first_page_url(search),
        }
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch_articles(&self, search: Option<&str>, page_url: Option<&str>) -> Result<ArticlePage> {
        let url = self.request_url(search, page_url)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(Error::NoData);
        }

        let page: ArticlePage = serde_json::from_slice(&body)?;
        debug!(
            "Received {} articles (count: {:?}, next: {:?})",
            page.results.as_ref().map_or(0, Vec::len),
            page.count,
            page.next
        );
        Ok(page)
    }
}
