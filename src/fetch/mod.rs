//! Upstream fetching.
//!
//! [`UpstreamFetcher`] is the production [`Fetch`] implementation: a shared
//! reqwest client in front of a [`FetchCache`]. The pipeline and gateway only
//! see the trait, so tests can substitute a stub.

mod cache;
mod client;
mod rewrite;

pub use cache::FetchCache;
pub use client::UpstreamFetcher;
pub use rewrite::{rewrite_happy_url, HAPPY_PREFIX};

use async_trait::async_trait;
use bytes::Bytes;
use clearcast_common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Body of an upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded playlist or manifest text.
    Text(String),
    /// Raw segment bytes.
    Binary(Bytes),
}

impl Payload {
    /// The payload as text. Binary payloads must be valid UTF-8.
    pub fn into_text(self) -> Result<String> {
        match self {
            Payload::Text(text) => Ok(text),
            Payload::Binary(bytes) => String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::internal(format!("payload is not UTF-8: {e}"))),
        }
    }

    /// The payload as bytes.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Payload::Text(text) => Bytes::from(text),
            Payload::Binary(bytes) => bytes,
        }
    }
}

/// HTTP GET against an upstream origin.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Payload>;
}

/// Start a background task that periodically drops expired cache entries.
pub fn start_cleanup_task(cache: Arc<FetchCache>, interval_secs: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let removed = cache.cleanup_expired();
            if removed > 0 {
                tracing::debug!("Purged {removed} expired cache entries");
            }
        }
    })
}
