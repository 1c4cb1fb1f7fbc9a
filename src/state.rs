//! Shared server state: configuration, the tree cache and the payload fetcher.

use crate::cache::SourceCache;
use crate::config::Config;
use crate::doc::{Doc, SourceOrigin};
use crate::error::SourceError;
use crate::fetch::{Fetch, HttpFetcher};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Everything a tool handler needs to turn a source argument into a [`Doc`].
pub struct DocsState {
    config: Arc<Config>,
    cache: SourceCache,
    fetcher: Arc<dyn Fetch>,
}

impl std::fmt::Debug for DocsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsState")
            .field("sources", &self.config.sources.len())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DocsState {
    /// State fetching payloads over HTTPS.
    pub fn new(config: Config) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFetcher::new()))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetch>) -> Self {
        let cache = SourceCache::new(config.cache_size);
        Self {
            config: Arc::new(config),
            cache,
            fetcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub const fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Load the tree for a source name or URL, from cache unless `force` is set.
    ///
    /// The origin is validated before anything is fetched.
    pub async fn load(&self, source: Option<&str>, force: bool) -> Result<Arc<Doc>, SourceError> {
        let url = self.config.source_url(source).to_string();
        SourceOrigin::parse(&url)?;

        let fetcher = Arc::clone(&self.fetcher);
        let site = self.config.site.clone();
        let target = url.clone();
        self.cache
            .get_or_load(&url, force, move || -> BoxFuture<'static, Result<Doc, SourceError>> {
                Box::pin(async move {
                    let body = fetcher.fetch(&target).await?;
                    let built_for = target.clone();
                    tokio::task::spawn_blocking(move || Doc::from_json(&target, &body, site))
                        .await
                        .map_err(|e| SourceError::Malformed {
                            url: built_for,
                            reason: format!("index build aborted: {e}"),
                        })?
                })
            })
            .await
    }
}
