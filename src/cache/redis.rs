//! Redis-backed segment cache.
//!
//! The connection manager is constructed once and injected; it handles
//! reconnection internally. Every operation runs under a bounded timeout,
//! and after any failure the cooldown gate reports the cache absent until
//! the interval elapses.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::time::timeout;

use crate::cache::{CacheError, CacheOutcome, SegmentCache};
use crate::config::RedisConfig;
use crate::observability::metrics;
use crate::resilience::CooldownGate;

pub struct RedisSegmentCache {
    conn: ConnectionManager,
    op_timeout: Duration,
    gate: CooldownGate,
}

impl RedisSegmentCache {
    /// Connect to Redis. A single connection attempt with a bounded timeout;
    /// the caller decides how to degrade when this fails.
    pub async fn connect(config: &RedisConfig) -> Result<Self, CacheError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        let connect_timeout = Duration::from_millis(config.connect_timeout_ms);
        let conn = match timeout(connect_timeout, client.get_connection_manager()).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => return Err(CacheError::Backend(e.to_string())),
            Err(_) => return Err(CacheError::Timeout),
        };

        tracing::info!(url = %config.url, "Redis cache connected");

        Ok(Self {
            conn,
            op_timeout: Duration::from_millis(config.op_timeout_ms),
            gate: CooldownGate::new(Duration::from_secs(config.cooldown_secs)),
        })
    }
}

#[async_trait]
impl SegmentCache for RedisSegmentCache {
    async fn get(&self, key: &str) -> CacheOutcome {
        if !self.gate.available() {
            return CacheOutcome::Unavailable;
        }

        let mut conn = self.conn.clone();
        match timeout(self.op_timeout, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(Some(value))) => {
                self.gate.record_success();
                CacheOutcome::Hit(value)
            }
            Ok(Ok(None)) => {
                self.gate.record_success();
                CacheOutcome::Miss
            }
            Ok(Err(e)) => {
                tracing::warn!(key = %key, error = %e, "Redis read failed, treating as unavailable");
                self.gate.record_failure();
                metrics::record_cache_failure("read");
                CacheOutcome::Unavailable
            }
            Err(_) => {
                tracing::warn!(key = %key, "Redis read timed out, treating as unavailable");
                self.gate.record_failure();
                metrics::record_cache_failure("read_timeout");
                CacheOutcome::Unavailable
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if !self.gate.available() {
            return Err(CacheError::Unavailable);
        }

        let mut conn = self.conn.clone();
        match timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()),
        )
        .await
        {
            Ok(Ok(())) => {
                self.gate.record_success();
                Ok(())
            }
            Ok(Err(e)) => {
                self.gate.record_failure();
                metrics::record_cache_failure("write");
                Err(CacheError::Backend(e.to_string()))
            }
            Err(_) => {
                self.gate.record_failure();
                metrics::record_cache_failure("write_timeout");
                Err(CacheError::Timeout)
            }
        }
    }

    fn available(&self) -> bool {
        self.gate.available()
    }
}
