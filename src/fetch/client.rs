//! reqwest-backed upstream fetcher.

use async_trait::async_trait;
use clearcast_common::paths::{is_container_segment, is_text_manifest};
use clearcast_common::{Error, HostAllowList, Result};
use reqwest::header::USER_AGENT;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

use super::rewrite::rewrite_happy_url;
use super::{Fetch, FetchCache, Payload};

/// Fetches upstream URLs through a shared [`FetchCache`].
///
/// `.m3u8`/`.mpd` responses are decoded as text and never cached; `.mp4` and
/// `.m4s` responses are cached as bytes; everything else is returned as
/// uncached bytes. Requests rotate through the configured user agents.
pub struct UpstreamFetcher {
    client: reqwest::Client,
    cache: Arc<FetchCache>,
    user_agents: Vec<String>,
    next_agent: AtomicUsize,
    happy_hosts: HostAllowList,
}

impl UpstreamFetcher {
    pub fn new(
        cache: Arc<FetchCache>,
        user_agents: Vec<String>,
        happy_upstreams: &[String],
    ) -> Result<Self> {
        if user_agents.is_empty() {
            return Err(Error::validation("at least one user agent is required"));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            cache,
            user_agents,
            next_agent: AtomicUsize::new(0),
            happy_hosts: HostAllowList::new(happy_upstreams),
        })
    }

    pub fn cache(&self) -> &Arc<FetchCache> {
        &self.cache
    }

    fn next_user_agent(&self) -> &str {
        let i = self.next_agent.fetch_add(1, Ordering::Relaxed);
        &self.user_agents[i % self.user_agents.len()]
    }
}

#[async_trait]
impl Fetch for UpstreamFetcher {
    async fn fetch(&self, url: &str) -> Result<Payload> {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!("Cache hit: {url}");
            return Ok(hit);
        }
        tracing::debug!("Cache miss: {url}");

        let parsed = Url::parse(url).map_err(|e| Error::upstream(url, format!("invalid URL: {e}")))?;
        let path = parsed.path();
        let request_url = rewrite_happy_url(url, &self.happy_hosts);

        let response = self
            .client
            .get(&request_url)
            .header(USER_AGENT, self.next_user_agent())
            .send()
            .await
            .map_err(|e| Error::upstream(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(url, format!("status {status}")));
        }

        let payload = if is_text_manifest(path) {
            Payload::Text(
                response
                    .text()
                    .await
                    .map_err(|e| Error::upstream(url, e.to_string()))?,
            )
        } else {
            Payload::Binary(
                response
                    .bytes()
                    .await
                    .map_err(|e| Error::upstream(url, e.to_string()))?,
            )
        };

        if is_container_segment(path) {
            self.cache.insert(url, payload.clone());
        }

        Ok(payload)
    }
}
