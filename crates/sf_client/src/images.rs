use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use sf_core::{Error, Result};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

pub type ImageData = Arc<[u8]>;

type PendingLoad = Shared<BoxFuture<'static, Option<ImageData>>>;

/// Rewrites `http://` URLs to `https://`; anything else is returned untouched.
pub fn upgrade_to_https(url: &str) -> Cow<'_, str> {
    match url.strip_prefix("http://") {
        Some(rest) => Cow::Owned(format!("https://{}", rest)),
        None => Cow::Borrowed(url),
    }
}

/// Fetches article images, caching the bytes by URL string.
///
/// A failed load leaves the caller's placeholder in place: it is logged and
/// reported as `None`, never as an error. Concurrent loads of one URL share a
/// single request.
#[derive(Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    cache: Arc<RwLock<HashMap<String, ImageData>>>,
    in_flight: Arc<Mutex<HashMap<String, PendingLoad>>>,
    upgrade_insecure: bool,
}

impl ImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            upgrade_insecure: true,
        }
    }

    pub fn with_https_upgrade(mut self, enabled: bool) -> Self {
        self.upgrade_insecure = enabled;
        self
    }

    pub async fn load(&self, url: &str) -> Option<ImageData> {
        let url = self.normalize(url);

        if let Some(data) = self.cached(&url).await {
            debug!("Image cache hit: {}", url);
            return Some(data);
        }

        let pending = {
            let mut in_flight = self.in_flight.lock().await;
            // A load may have finished between the cache check and taking the lock.
            if let Some(data) = self.cached(&url).await {
                return Some(data);
            }
            match in_flight.get(&url) {
                Some(pending) => {
                    debug!("Joining in-flight image load: {}", url);
                    pending.clone()
                }
                None => {
                    let pending = self.clone().fetch_and_store(url.clone()).boxed().shared();
                    in_flight.insert(url, pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Loads every distinct URL concurrently and returns how many succeeded.
    pub async fn prefetch<I, S>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: HashSet<String> = urls.into_iter().map(|url| self.normalize(url.as_ref())).collect();
        let loads = unique.iter().map(|url| self.load(url));

        join_all(loads).await.into_iter().flatten().count()
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    fn normalize(&self, url: &str) -> String {
        if self.upgrade_insecure {
            upgrade_to_https(url).into_owned()
        } else {
            url.to_string()
        }
    }

    async fn cached(&self, url: &str) -> Option<ImageData> {
        self.cache.read().await.get(url).cloned()
    }

    /// Fills the cache before leaving the in-flight map, so a finished load is
    /// always visible in one of the two.
    async fn fetch_and_store(self, url: String) -> Option<ImageData> {
        let result = match self.fetch(&url).await {
            Ok(data) => {
                self.cache.write().await.insert(url.clone(), data.clone());
                Some(data)
            }
            Err(e) => {
                warn!("Failed to load image {}: {}", url, e);
                None
            }
        };
        self.in_flight.lock().await.remove(&url);
        result
    }

    async fn fetch(&self, url: &str) -> Result<ImageData> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(Error::NoData);
        }
        Ok(Arc::from(&bytes[..]))
    }
}
