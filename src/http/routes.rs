//! Endpoint handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::geo::{CoordinateInput, Unit};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::segment::{LookupResponse, SegmentKey};

/// Body of `POST /route-generation`.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: Option<CoordinateInput>,
    pub dest: Option<CoordinateInput>,
    pub units: Option<Unit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub coordinates: Vec<[f64; 2]>,
}

/// Compute a route between two coordinates.
///
/// Exactly one provider invocation per request, no retry. Absent, errored,
/// or non-line provider output returns a successful empty coordinate
/// sequence: callers treat "empty" and "no route" identically.
pub async fn generate_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let origin = request.origin.as_ref().and_then(CoordinateInput::validate);
    let dest = request.dest.as_ref().and_then(CoordinateInput::validate);
    let (Some(origin), Some(dest)) = (origin, dest) else {
        return Err(ApiError::InvalidCoordinates);
    };

    let unit = request.units.unwrap_or_default();

    let coordinates = match state.provider.compute(origin, dest, unit).await {
        Ok(Some(line)) => line,
        Ok(None) => {
            tracing::debug!("Provider produced no usable line geometry");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Route provider failed, returning empty route");
            metrics::record_provider_failure();
            Vec::new()
        }
    };

    Ok(Json(RouteResponse { coordinates }))
}

/// Query string of `GET /segment-lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(rename = "originPortId")]
    pub origin_port_id: Option<String>,
    #[serde(rename = "destinationPortId")]
    pub destination_port_id: Option<String>,
}

/// Serve the active segment for an ordered port pair through the cache chain.
pub async fn lookup_segment(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, ApiError> {
    let (Some(origin), Some(destination)) = (
        params.origin_port_id.as_deref(),
        params.destination_port_id.as_deref(),
    ) else {
        return Err(ApiError::MissingPorts);
    };

    let key = SegmentKey::new(origin, destination)?;
    let response = state.lookup.lookup(&key).await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache_available: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        cache_available: state.lookup.cache_available(),
    })
}
