//! Segment lookup orchestration.
//!
//! # Data Flow
//! ```text
//! lookup(key)
//!     → cache.get (Hit / Miss / Unavailable)
//!     → Hit: deserialize entry, return (no store query)
//!     → Miss or Unavailable: store.fetch_active(key)
//!         → no row: negative cache write (short TTL), {found:false}
//!         → row: decode fields, positive cache write (long TTL), {found:true}
//! ```
//!
//! # Design Decisions
//! - Cache trouble never blocks the read path; `Unavailable` falls through
//!   like a miss
//! - Cache writes are best-effort; a failed write is logged and counted,
//!   never surfaced
//! - Store errors are the only ones surfaced, since at that point no
//!   fallback remains
//! - Concurrent lookups for the same uncached key may each query the store
//!   and each repopulate the cache; the write is idempotent, last writer wins

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheOutcome, SegmentCache};
use crate::observability::metrics;
use crate::segment::{LookupResponse, Segment, SegmentKey};
use crate::store::{SegmentStore, StoreError};

pub struct SegmentLookupService {
    cache: Arc<dyn SegmentCache>,
    store: Arc<dyn SegmentStore>,
    positive_ttl: Duration,
    negative_ttl: Duration,
}

impl SegmentLookupService {
    pub fn new(
        cache: Arc<dyn SegmentCache>,
        store: Arc<dyn SegmentStore>,
        positive_ttl: Duration,
        negative_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            positive_ttl,
            negative_ttl,
        }
    }

    /// Read-through lookup for the active segment under `key`.
    pub async fn lookup(&self, key: &SegmentKey) -> Result<LookupResponse, StoreError> {
        let cache_key = key.cache_key();

        match self.cache.get(&cache_key).await {
            CacheOutcome::Hit(raw) => {
                match serde_json::from_str::<LookupResponse>(&raw) {
                    Ok(response) => {
                        tracing::debug!(key = %cache_key, "Cache hit");
                        metrics::record_cache_outcome("hit");
                        return Ok(response);
                    }
                    Err(e) => {
                        // A malformed entry is treated like a miss; the
                        // durable store remains the source of truth.
                        tracing::warn!(key = %cache_key, error = %e, "Malformed cache entry, falling back to store");
                        metrics::record_cache_outcome("malformed");
                    }
                }
            }
            CacheOutcome::Miss => {
                tracing::debug!(key = %cache_key, "Cache miss");
                metrics::record_cache_outcome("miss");
            }
            CacheOutcome::Unavailable => {
                tracing::debug!(key = %cache_key, "Cache unavailable, falling back to store");
                metrics::record_cache_outcome("unavailable");
            }
        }

        match self.store.fetch_active(key).await? {
            None => {
                let response = LookupResponse::not_found();
                self.write_back(&cache_key, &response, self.negative_ttl)
                    .await;
                Ok(response)
            }
            Some(row) => {
                let response = LookupResponse::found(Segment::from_row(row));
                self.write_back(&cache_key, &response, self.positive_ttl)
                    .await;
                Ok(response)
            }
        }
    }

    /// Whether the distributed cache is currently answering.
    pub fn cache_available(&self) -> bool {
        self.cache.available()
    }

    /// Best-effort cache population. The authoritative answer has already
    /// been computed, so failures are logged and ignored.
    async fn write_back(&self, cache_key: &str, response: &LookupResponse, ttl: Duration) {
        let payload = match serde_json::to_string(response) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(key = %cache_key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.cache.put(cache_key, &payload, ttl).await {
            tracing::warn!(key = %cache_key, error = %e, "Cache write failed, continuing");
            metrics::record_cache_write("error");
        } else {
            metrics::record_cache_write("ok");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::cache::{CacheError, MemoryCache, NullCache};
    use crate::store::SegmentRow;

    const POSITIVE_TTL: Duration = Duration::from_secs(3600);
    const NEGATIVE_TTL: Duration = Duration::from_secs(60);

    fn row(origin: &str, destination: &str) -> SegmentRow {
        SegmentRow {
            origin_port_id: origin.into(),
            destination_port_id: destination.into(),
            coordinates: "[[4.0,51.9],[3.3,51.3]]".into(),
            route_type: "generated".into(),
            distance_nm: 120.0,
            distance_km: 222.2,
            created_at: "2024-05-01 10:00:00".into(),
            updated_at: "2024-05-02 10:00:00".into(),
            created_by: "pipeline".into(),
            version: 1,
            metadata: "{}".into(),
            is_active: 1,
        }
    }

    /// Store fake counting every fetch, optionally failing.
    struct FakeStore {
        rows: HashMap<(String, String), SegmentRow>,
        calls: AtomicU32,
        fail: bool,
    }

    impl FakeStore {
        fn with_rows(rows: Vec<SegmentRow>) -> Self {
            Self {
                rows: rows
                    .into_iter()
                    .map(|r| ((r.origin_port_id.clone(), r.destination_port_id.clone()), r))
                    .collect(),
                calls: AtomicU32::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                rows: HashMap::new(),
                calls: AtomicU32::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SegmentStore for FakeStore {
        async fn fetch_active(&self, key: &SegmentKey) -> Result<Option<SegmentRow>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Unavailable("store down".into()));
            }
            Ok(self
                .rows
                .get(&(key.origin().to_string(), key.destination().to_string()))
                .cloned())
        }
    }

    /// Cache fake that is permanently unavailable.
    struct DownCache;

    #[async_trait]
    impl SegmentCache for DownCache {
        async fn get(&self, _key: &str) -> CacheOutcome {
            CacheOutcome::Unavailable
        }

        async fn put(&self, _k: &str, _v: &str, _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::Unavailable)
        }

        fn available(&self) -> bool {
            false
        }
    }

    fn service(
        cache: Arc<dyn SegmentCache>,
        store: Arc<FakeStore>,
    ) -> SegmentLookupService {
        SegmentLookupService::new(cache, store, POSITIVE_TTL, NEGATIVE_TTL)
    }

    #[tokio::test]
    async fn read_through_populates_cache() {
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(FakeStore::with_rows(vec![row("PORT_A", "PORT_B")]));
        let svc = service(cache.clone(), store.clone());
        let key = SegmentKey::new("PORT_A", "PORT_B").unwrap();

        let first = svc.lookup(&key).await.unwrap();
        assert!(first.found);
        assert_eq!(store.calls(), 1);

        let second = svc.lookup(&key).await.unwrap();
        assert!(second.found);
        assert_eq!(store.calls(), 1, "second lookup must be served from cache");
    }

    #[tokio::test]
    async fn negative_result_is_cached_with_short_ttl() {
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(FakeStore::with_rows(vec![]));
        let svc = service(cache.clone(), store.clone());
        let key = SegmentKey::new("X", "Y").unwrap();

        let response = svc.lookup(&key).await.unwrap();
        assert!(!response.found);

        match cache.get("segment:X-Y").await {
            CacheOutcome::Hit(raw) => assert_eq!(raw, r#"{"found":false}"#),
            other => panic!("expected negative cache entry, got {other:?}"),
        }
        assert!(cache.ttl_remaining("segment:X-Y").unwrap() <= NEGATIVE_TTL);

        svc.lookup(&key).await.unwrap();
        assert_eq!(store.calls(), 1, "repeat lookup within TTL must not hit the store");
    }

    #[tokio::test]
    async fn lookup_is_directional() {
        let store = Arc::new(FakeStore::with_rows(vec![row("PORT_A", "PORT_B")]));
        let svc = service(Arc::new(MemoryCache::new()), store);

        let forward = svc
            .lookup(&SegmentKey::new("PORT_A", "PORT_B").unwrap())
            .await
            .unwrap();
        assert!(forward.found);

        let reverse = svc
            .lookup(&SegmentKey::new("PORT_B", "PORT_A").unwrap())
            .await
            .unwrap();
        assert!(!reverse.found, "reverse pair is a distinct key");
    }

    #[tokio::test]
    async fn unavailable_cache_still_serves_from_store() {
        let store = Arc::new(FakeStore::with_rows(vec![row("PORT_A", "PORT_B")]));
        let svc = service(Arc::new(DownCache), store.clone());
        let key = SegmentKey::new("PORT_A", "PORT_B").unwrap();

        let response = svc.lookup(&key).await.unwrap();
        assert!(response.found);

        // Every lookup goes to the store while the cache is down; the failed
        // write-back never surfaces.
        svc.lookup(&key).await.unwrap();
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn malformed_cache_entry_falls_back_to_store() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .put("segment:PORT_A-PORT_B", "{not json", POSITIVE_TTL)
            .await
            .unwrap();
        let store = Arc::new(FakeStore::with_rows(vec![row("PORT_A", "PORT_B")]));
        let svc = service(cache.clone(), store.clone());

        let response = svc
            .lookup(&SegmentKey::new("PORT_A", "PORT_B").unwrap())
            .await
            .unwrap();
        assert!(response.found);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn store_error_surfaces() {
        let svc = service(Arc::new(NullCache), Arc::new(FakeStore::failing()));
        let result = svc
            .lookup(&SegmentKey::new("PORT_A", "PORT_B").unwrap())
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn repeated_write_back_is_idempotent() {
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(FakeStore::with_rows(vec![]));
        let svc = SegmentLookupService::new(
            cache.clone(),
            store,
            POSITIVE_TTL,
            Duration::from_millis(5),
        );
        let key = SegmentKey::new("X", "Y").unwrap();

        svc.lookup(&key).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        svc.lookup(&key).await.unwrap();

        match cache.get("segment:X-Y").await {
            CacheOutcome::Hit(raw) => assert_eq!(raw, r#"{"found":false}"#),
            other => panic!("expected cache entry after rewrite, got {other:?}"),
        }
    }
}
