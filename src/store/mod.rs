//! Durable segment store.
//!
//! The authoritative source of truth for saved segments. This service only
//! consumes the read path; saves arrive through an external pipeline that
//! appends a new version per key and moves the active flag to it.

mod clickhouse;

pub use clickhouse::ClickHouseStore;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::segment::SegmentKey;

/// Errors from the durable store. These are the only upstream errors the
/// read path surfaces to callers, since no fallback remains at that point.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("segment store unavailable: {0}")]
    Unavailable(String),
    #[error("segment store query failed: {0}")]
    Query(String),
    #[error("segment store returned a malformed row: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One row of the `route_segments` table as returned by the store.
///
/// `coordinates` and `metadata` are embedded JSON columns; they are decoded
/// defensively downstream, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentRow {
    pub origin_port_id: String,
    pub destination_port_id: String,
    pub coordinates: String,
    pub route_type: String,
    pub distance_nm: f64,
    pub distance_km: f64,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
    pub version: u32,
    pub metadata: String,
    pub is_active: u8,
}

/// Read access to the most recently updated active segment per key.
#[async_trait]
pub trait SegmentStore: Send + Sync {
    async fn fetch_active(&self, key: &SegmentKey) -> Result<Option<SegmentRow>, StoreError>;
}

/// Store implementation selected when durable-store connectivity is disabled
/// by configuration: the stage behaves as if every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

#[async_trait]
impl SegmentStore for DisabledStore {
    async fn fetch_active(&self, _key: &SegmentKey) -> Result<Option<SegmentRow>, StoreError> {
        Ok(None)
    }
}
