//! Upstream gateway: logical query in, cached upstream JSON out.

use reqwest::header;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::cache::{ResponseCache, DEFAULT_TTL};
use crate::error::UpstreamError;
use crate::query::LogicalQuery;
use crate::retry::RetryPolicy;
use crate::{Clock, SystemClock};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only proxy client for the upstream surface API.
///
/// Calls are independent and may race against the shared cache; there is no
/// per-key mutual exclusion, so concurrent misses for the same key can both
/// fetch, with the later write winning.
pub struct UpstreamGateway {
    client: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
    retry: RetryPolicy,
}

impl UpstreamGateway {
    /// Gateway with the default retry policy and a 60s cache TTL.
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        Self::with_parts(base_url, RetryPolicy::default(), DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Gateway with explicit retry policy, TTL and clock.
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn with_parts(
        base_url: &str,
        retry: RetryPolicy,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(ttl, clock),
            retry,
        })
    }

    /// Resolve a logical query, serving from the cache when a fresh entry
    /// exists and populating it after a successful fetch.
    ///
    /// # Errors
    /// Returns `UpstreamError` once the retry budget is exhausted or on the
    /// first permanent (non-retryable) upstream status.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, query: &LogicalQuery) -> Result<Value, UpstreamError> {
        let key = query.cache_key();
        if let Some(payload) = self.cache.get_fresh(&key) {
            tracing::debug!(%key, "serving cached upstream response");
            return Ok(payload);
        }

        let url = query.upstream_url(&self.base_url)?;
        let payload = self.fetch_json(&url).await?;
        self.cache.store(&key, payload.clone());
        Ok(payload)
    }

    /// Fetch with bounded retries and linear backoff.
    async fn fetch_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        let mut failures = 0u32;
        loop {
            match self.try_fetch(url).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_retryable() => {
                    failures += 1;
                    if failures >= self.retry.max_attempts {
                        tracing::error!(
                            attempts = failures,
                            error = %err,
                            "upstream fetch failed, retry budget exhausted"
                        );
                        return Err(err);
                    }
                    let delay = self.retry.delay_after(failures);
                    tracing::warn!(
                        attempt = failures,
                        ?delay,
                        error = %err,
                        "retryable upstream failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "permanent upstream failure");
                    return Err(err);
                }
            }
        }
    }

    /// One upstream attempt. Asks for JSON and bypasses intermediate caches
    /// so the call always reaches the origin.
    async fn try_fetch(&self, url: &Url) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status: status.as_u16(), detail });
        }

        let text = response.text().await?;
        // Non-JSON bodies are passed through rather than failing the query.
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text })))
    }
}
