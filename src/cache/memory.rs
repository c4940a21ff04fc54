//! In-process TTL cache.
//!
//! Backs tests and single-node deployments where Redis is overkill. Entries
//! expire lazily on read; there is no background sweeper.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::cache::{CacheError, CacheOutcome, SegmentCache};

#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, StoredEntry>,
}

struct StoredEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of a live entry, if present.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .and_then(|entry| entry.expires_at.checked_duration_since(Instant::now()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SegmentCache for MemoryCache {
    async fn get(&self, key: &str) -> CacheOutcome {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return CacheOutcome::Hit(entry.value.clone());
            }
            drop(entry);
            self.entries.remove(key);
        }
        CacheOutcome::Miss
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let cache = MemoryCache::new();
        cache
            .put("segment:A-B", r#"{"found":false}"#, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get("segment:A-B").await,
            CacheOutcome::Hit(r#"{"found":false}"#.to_string())
        );
        assert!(cache.ttl_remaining("segment:A-B").unwrap() <= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn absent_key_misses() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("segment:A-B").await, CacheOutcome::Miss);
    }

    #[tokio::test]
    async fn expired_entry_misses() {
        let cache = MemoryCache::new();
        cache
            .put("segment:A-B", "x", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("segment:A-B").await, CacheOutcome::Miss);
        assert!(cache.is_empty());
    }
}
