//! Retrieval of documentation payloads.

use crate::error::SourceError;
use futures::future::BoxFuture;
use std::time::Duration;

/// Upper bound for a single payload download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the raw JSON text behind a source URL.
///
/// Futures are `'static` so a single load can be shared between callers.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<String, SourceError>>;
}

/// [`Fetch`] over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<String, SourceError>> {
        let client = self.client.clone();
        let url = url.to_string();
        Box::pin(async move {
            let unreachable = |reason: String| SourceError::Unreachable {
                url: url.clone(),
                reason,
            };

            tracing::debug!("Fetching {}", url);
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| unreachable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(unreachable(format!("HTTP {status}")));
            }

            response.text().await.map_err(|e| unreachable(e.to_string()))
        })
    }
}
