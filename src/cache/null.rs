//! No-op cache used when the distributed cache is disabled by configuration.
//! Every read misses; every write succeeds silently.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheError, CacheOutcome, SegmentCache};

#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

#[async_trait]
impl SegmentCache for NullCache {
    async fn get(&self, _key: &str) -> CacheOutcome {
        CacheOutcome::Miss
    }

    async fn put(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
