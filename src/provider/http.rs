//! HTTP implementation of the route provider.
//!
//! Wraps both coordinates as GeoJSON point features, posts them to the
//! configured routing engine, and extracts the `LineString` geometry from
//! the answer. Anything that is not a line normalizes to `None`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::geo::{Coordinate, Unit};
use crate::provider::{ProviderError, RouteProvider};

pub struct HttpRouteProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpRouteProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn compute(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        unit: Unit,
    ) -> Result<Option<Vec<[f64; 2]>>, ProviderError> {
        let body = json!({
            "origin": point_feature(origin),
            "destination": point_feature(destination),
            "units": unit,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let feature: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Body(e.to_string()))?;

        Ok(extract_line(&feature))
    }
}

/// GeoJSON point feature for a coordinate. GeoJSON orders [longitude, latitude].
fn point_feature(coordinate: Coordinate) -> Value {
    json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Point",
            "coordinates": [coordinate.lng, coordinate.lat],
        },
    })
}

/// Pull the coordinate sequence out of a GeoJSON feature. Absent, malformed,
/// or non-line geometry yields `None`.
fn extract_line(feature: &Value) -> Option<Vec<[f64; 2]>> {
    let geometry = feature.get("geometry")?;
    if geometry.get("type")?.as_str()? != "LineString" {
        return None;
    }

    let pairs = geometry.get("coordinates")?.as_array()?;
    let mut line = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let pair = pair.as_array()?;
        let lng = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        line.push([lng, lat]);
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_line_string_coordinates() {
        let feature = json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[4.0, 51.9], [3.3, 51.3], [-5.6, 36.0]],
            },
        });
        assert_eq!(
            extract_line(&feature),
            Some(vec![[4.0, 51.9], [3.3, 51.3], [-5.6, 36.0]])
        );
    }

    #[test]
    fn non_line_geometry_yields_none() {
        let feature = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [4.0, 51.9] },
        });
        assert_eq!(extract_line(&feature), None);
    }

    #[test]
    fn missing_geometry_yields_none() {
        assert_eq!(extract_line(&json!({"type": "Feature"})), None);
    }

    #[test]
    fn malformed_pair_yields_none() {
        let feature = json!({
            "geometry": {
                "type": "LineString",
                "coordinates": [[4.0, 51.9], ["x", 51.3]],
            },
        });
        assert_eq!(extract_line(&feature), None);
    }

    #[test]
    fn point_feature_orders_lng_lat() {
        let feature = point_feature(Coordinate { lat: 51.9, lng: 4.0 });
        assert_eq!(
            feature["geometry"]["coordinates"],
            json!([4.0, 51.9])
        );
    }
}
