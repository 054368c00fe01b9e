//! In-memory upstream response cache.
//!
//! Keyed by the exact request URL. Entries expire `ttl` after insertion and
//! the oldest insertion is evicted when the cache is full.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::Payload;

/// Entry in the fetch cache.
struct CacheEntry {
    payload: Payload,
    inserted_at: Instant,
}

/// Thread-safe cache for upstream payloads.
pub struct FetchCache {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl FetchCache {
    /// Create a new fetch cache.
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get a payload if a live entry exists.
    pub fn get(&self, url: &str) -> Option<Payload> {
        let entry = self.entries.get(url)?;
        if entry.inserted_at.elapsed() < self.ttl {
            return Some(entry.payload.clone());
        }
        // Entry is stale, remove it
        drop(entry);
        self.entries.remove(url);
        None
    }

    /// Store a payload, evicting the oldest entry if at capacity.
    ///
    /// Re-inserting an existing URL replaces its payload and resets its age.
    pub fn insert(&self, url: &str, payload: Payload) {
        if !self.entries.contains_key(url) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                payload,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.entries.len();
        let now = Instant::now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.inserted_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            tracing::debug!("Evicting cached payload: {key}");
            self.entries.remove(&key);
        }
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        // Default: 10 entries, 1 hour TTL
        Self::new(10, 3600)
    }
}
