//! Distributed cache layer for segment lookups.
//!
//! Provides a [`SegmentCache`] trait with three implementations:
//! - [`RedisSegmentCache`] - production Redis-backed cache
//! - [`MemoryCache`] - in-process TTL cache for tests and single-node use
//! - [`NullCache`] - no-op implementation selected when caching is disabled
//!
//! # Design Decisions
//! - Reads return an explicit [`CacheOutcome`] instead of a `Result`: the
//!   fallback decision in the lookup service is a visible branch, and cache
//!   trouble can never fail the read path
//! - Writes are best-effort; callers log and ignore failures
//! - Entries are opaque strings; the lookup service owns (de)serialization

mod memory;
mod null;
mod redis;

pub use memory::MemoryCache;
pub use null::NullCache;
pub use self::redis::RedisSegmentCache;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Result of a cache read, tagged per stage outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The key was present; the raw stored payload.
    Hit(String),
    /// The key was absent.
    Miss,
    /// The cache could not answer (connection, timeout, open cooldown gate).
    /// Control flow treats this like a miss.
    Unavailable,
}

/// Errors raised by best-effort cache writes.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache operation timed out")]
    Timeout,
    #[error("cache unavailable")]
    Unavailable,
}

/// Expiring key-value store for lookup projections.
#[async_trait]
pub trait SegmentCache: Send + Sync {
    /// Read a key. Never fails; trouble is reported as
    /// [`CacheOutcome::Unavailable`].
    async fn get(&self, key: &str) -> CacheOutcome;

    /// Write a key with an expiry. Best-effort.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Whether the cache is currently answering (cooldown gate open).
    fn available(&self) -> bool {
        true
    }
}
