//! Segment domain model.
//!
//! A segment is a stored maritime route between two specific ports. Keys are
//! directional: the segment for (A, B) is distinct from (B, A), since routes
//! can differ by direction (currents, shipping lanes).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::observability::metrics;
use crate::store::SegmentRow;

/// Errors raised when constructing a [`SegmentKey`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("origin and destination port ids must not be empty")]
    Empty,
    #[error("origin and destination ports cannot be the same")]
    Equal,
}

/// Ordered pair of port ids identifying a segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    origin: String,
    destination: String,
}

impl SegmentKey {
    /// Build a key from raw port ids. Equal or empty ids are rejected before
    /// any external call is made.
    pub fn new(origin: &str, destination: &str) -> Result<Self, KeyError> {
        if origin.is_empty() || destination.is_empty() {
            return Err(KeyError::Empty);
        }
        if origin == destination {
            return Err(KeyError::Equal);
        }
        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Render the distributed-cache key for this pair.
    pub fn cache_key(&self) -> String {
        format!("segment:{}-{}", self.origin, self.destination)
    }
}

/// How a stored route came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    Generated,
    Manual,
    Edited,
}

impl RouteClass {
    /// Parse the stored classification, degrading unknown values to
    /// `generated` so a bad row cannot fail the whole response.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "generated" => Self::Generated,
            "manual" => Self::Manual,
            "edited" => Self::Edited,
            other => {
                tracing::warn!(route_type = %other, "Unknown route classification, defaulting to generated");
                metrics::record_field_decode_failure("route_type");
                Self::Generated
            }
        }
    }
}

/// The segment projection served by lookup responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub origin_port_id: String,
    pub destination_port_id: String,
    /// Ordered [longitude, latitude] pairs.
    pub coordinates: Vec<[f64; 2]>,
    pub coordinate_count: usize,
    pub route_type: RouteClass,
    pub distance_nm: f64,
    pub distance_km: f64,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
    pub version: u32,
    pub metadata: HashMap<String, Value>,
    pub is_active: bool,
}

impl Segment {
    /// Assemble the projection from a durable-store row.
    ///
    /// The embedded `coordinates` and `metadata` columns are decoded
    /// independently: a malformed value degrades to its default instead of
    /// failing the response, with a warning and a counter so corruption
    /// stays visible.
    pub fn from_row(row: SegmentRow) -> Self {
        let coordinates = decode_coordinates(&row.coordinates);
        let metadata = decode_metadata(&row.metadata);
        let route_type = RouteClass::parse_or_default(&row.route_type);

        Self {
            origin_port_id: row.origin_port_id,
            destination_port_id: row.destination_port_id,
            coordinate_count: coordinates.len(),
            coordinates,
            route_type,
            distance_nm: row.distance_nm,
            distance_km: row.distance_km,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            version: row.version,
            metadata,
            is_active: row.is_active != 0,
        }
    }
}

/// Lookup result envelope. The negative form serializes to exactly
/// `{"found":false}`, which is also the negative cache entry payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
}

impl LookupResponse {
    pub fn not_found() -> Self {
        Self {
            found: false,
            segment: None,
        }
    }

    pub fn found(segment: Segment) -> Self {
        Self {
            found: true,
            segment: Some(segment),
        }
    }
}

fn decode_coordinates(raw: &str) -> Vec<[f64; 2]> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(raw) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed embedded coordinates, serving empty polyline");
            metrics::record_field_decode_failure("coordinates");
            Vec::new()
        }
    }
}

fn decode_metadata(raw: &str) -> HashMap<String, Value> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str(raw) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed embedded metadata, serving empty map");
            metrics::record_field_decode_failure("metadata");
            HashMap::new()
        }
    }
}
