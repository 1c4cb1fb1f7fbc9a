//! Cache of built documentation trees, keyed by source URL.
//!
//! Concurrent requests for the same source share a single in-flight load.
//! Only successful loads are cached.

use crate::doc::Doc;
use crate::error::SourceError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A future that builds a [`Doc`], awaited by every caller interested in its URL.
type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Doc>, SourceError>>>;

/// LRU of built trees plus the loads currently in progress.
pub struct SourceCache {
    cache: RwLock<LruCache<String, Arc<Doc>>>,
    in_flight: Mutex<HashMap<String, SharedLoad>>,
}

impl std::fmt::Debug for SourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCache")
            .field("cache_size", &self.cache.try_read().map(|c| c.len()).ok())
            .field("in_flight_count", &self.in_flight.try_lock().map(|m| m.len()).ok())
            .finish()
    }
}

impl SourceCache {
    /// Create a cache holding at most `capacity` trees (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Get a cached tree without loading.
    pub async fn get(&self, url: &str) -> Option<Arc<Doc>> {
        self.cache.write().await.get(url).cloned()
    }

    /// Get the tree for `url`, loading it with `load` when needed.
    ///
    /// A cache hit or an in-flight load for the same URL is reused unless `force`
    /// is set, in which case a fresh load replaces whatever is cached once it succeeds.
    pub async fn get_or_load<F>(
        &self,
        url: &str,
        force: bool,
        load: F,
    ) -> Result<Arc<Doc>, SourceError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<Doc, SourceError>>,
    {
        if !force && let Some(doc) = self.get(url).await {
            tracing::debug!("Cache hit for {}", url);
            return Ok(doc);
        }

        let future = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(url) {
                Some(future) if !force => {
                    tracing::debug!("Awaiting in-flight load of {}", url);
                    future.clone()
                }
                _ => {
                    if !force && let Some(doc) = self.cache.write().await.get(url).cloned() {
                        return Ok(doc);
                    }
                    tracing::info!("Loading documentation from {}", url);
                    let future = load().map(|result| result.map(Arc::new)).boxed().shared();
                    in_flight.insert(url.to_string(), future.clone());
                    future
                }
            }
        };

        let result = future.clone().await;
        self.finish(url, &future, &result).await;
        result
    }

    /// Retire a completed load, caching its tree if it succeeded.
    ///
    /// Only the first caller to finish a given load does anything; a newer load
    /// registered under the same URL is left alone.
    async fn finish(&self, url: &str, future: &SharedLoad, result: &Result<Arc<Doc>, SourceError>) {
        let mut in_flight = self.in_flight.lock().await;
        if !in_flight.get(url).is_some_and(|current| current.ptr_eq(future)) {
            return;
        }

        // Publish before retiring the load so no caller sees neither.
        match result {
            Ok(doc) => {
                self.cache.write().await.put(url.to_string(), Arc::clone(doc));
                tracing::debug!("Cached documentation for {}", url);
            }
            Err(e) => tracing::warn!("Failed to load {}: {}", url, e),
        }
        in_flight.remove(url);
    }

    /// Drop the cached tree for `url`.
    pub async fn evict(&self, url: &str) -> Option<Arc<Doc>> {
        self.cache.write().await.pop(url)
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
        self.in_flight.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.cache.read().await.contains(url)
    }

    /// Whether a load for `url` is in progress.
    pub async fn is_loading(&self, url: &str) -> bool {
        self.in_flight.lock().await.contains_key(url)
    }
}
