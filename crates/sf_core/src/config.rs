use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.spaceflightnewsapi.net/v4/articles/";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_ORDERING: &str = "-published_at";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the articles endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_limit: u32,
    pub ordering: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            ordering: DEFAULT_ORDERING.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sfn/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
