//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse, URLs parse)
//! - Reject store identifiers that cannot be spliced into a query safely
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUrl { field: &'static str, value: String },
    InvalidIdentifier { field: &'static str, value: String },
    ZeroTimeout(&'static str),
    ZeroTtl(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddress(addr) => write!(f, "invalid bind address '{addr}'"),
            Self::InvalidUrl { field, value } => write!(f, "invalid URL for {field}: '{value}'"),
            Self::InvalidIdentifier { field, value } => {
                write!(f, "invalid identifier for {field}: '{value}'")
            }
            Self::ZeroTimeout(field) => write!(f, "{field} must be greater than zero"),
            Self::ZeroTtl(field) => write!(f, "{field} must be greater than zero"),
        }
    }
}

/// ClickHouse database/table names end up inside the query text, so they are
/// restricted to plain identifiers.
fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.redis.enabled && url::Url::parse(&config.redis.url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "redis.url",
            value: config.redis.url.clone(),
        });
    }

    if config.clickhouse.enabled {
        if url::Url::parse(&config.clickhouse.url).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "clickhouse.url",
                value: config.clickhouse.url.clone(),
            });
        }
        if !is_identifier(&config.clickhouse.database) {
            errors.push(ValidationError::InvalidIdentifier {
                field: "clickhouse.database",
                value: config.clickhouse.database.clone(),
            });
        }
        if !is_identifier(&config.clickhouse.table) {
            errors.push(ValidationError::InvalidIdentifier {
                field: "clickhouse.table",
                value: config.clickhouse.table.clone(),
            });
        }
        if config.clickhouse.timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout("clickhouse.timeout_secs"));
        }
    }

    if url::Url::parse(&config.provider.url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "provider.url",
            value: config.provider.url.clone(),
        });
    }
    if config.provider.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("provider.timeout_secs"));
    }

    if config.cache.positive_ttl_secs == 0 {
        errors.push(ValidationError::ZeroTtl("cache.positive_ttl_secs"));
    }
    if config.cache.negative_ttl_secs == 0 {
        errors.push(ValidationError::ZeroTtl("cache.negative_ttl_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
