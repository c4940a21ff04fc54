//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the segment service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Distributed cache (Redis) settings.
    pub redis: RedisConfig,

    /// Durable segment store (ClickHouse) settings.
    pub clickhouse: ClickHouseConfig,

    /// External route provider settings.
    pub provider: ProviderConfig,

    /// Cache entry lifetimes.
    pub cache: CacheTtlConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Distributed cache settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Enable the distributed cache stage. When disabled the stage behaves
    /// as if every read misses.
    pub enabled: bool,

    /// Redis connection URL.
    pub url: String,

    /// Initial connection timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Per-operation timeout in milliseconds.
    pub op_timeout_ms: u64,

    /// How long the cache is treated as absent after a failure.
    pub cooldown_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "redis://127.0.0.1:6379".to_string(),
            connect_timeout_ms: 2000,
            op_timeout_ms: 250,
            cooldown_secs: 30,
        }
    }
}

/// Durable segment store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClickHouseConfig {
    /// Enable durable-store connectivity. When disabled every lookup
    /// behaves as if no segment is saved.
    pub enabled: bool,

    /// HTTP interface URL (e.g., "http://localhost:8123").
    pub url: String,

    /// Database holding the segments table.
    pub database: String,

    /// Segments table name.
    pub table: String,

    /// Optional credentials.
    pub user: Option<String>,
    pub password: Option<String>,

    /// Query timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8123".to_string(),
            database: "searoutes".to_string(),
            table: "route_segments".to_string(),
            user: None,
            password: None,
            timeout_secs: 10,
        }
    }
}

/// External route provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Routing engine endpoint URL.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3857/route".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Cache entry lifetimes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheTtlConfig {
    /// Lifetime of a found-segment entry in seconds.
    pub positive_ttl_secs: u64,

    /// Lifetime of a not-found marker in seconds. Kept short so a segment
    /// saved right after a miss becomes visible quickly.
    pub negative_ttl_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            positive_ttl_secs: 3600,
            negative_ttl_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.cache.negative_ttl_secs, 60);
        assert_eq!(config.cache.positive_ttl_secs, 3600);
        assert!(config.redis.enabled);
        assert!(config.clickhouse.enabled);
    }

    #[test]
    fn sections_override_independently() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [redis]
            enabled = false

            [clickhouse]
            database = "maritime"
            table = "segments"

            [cache]
            negative_ttl_secs = 15
            "#,
        )
        .unwrap();
        assert!(!config.redis.enabled);
        assert_eq!(config.clickhouse.database, "maritime");
        assert_eq!(config.cache.negative_ttl_secs, 15);
        // untouched sections keep defaults
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
