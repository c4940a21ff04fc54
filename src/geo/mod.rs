//! Geographic primitives shared by the route-generation surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Raw coordinate fields as received on the wire.
///
/// Fields are kept as JSON values so that a non-numeric latitude is a
/// validation branch (400 with a specific message) rather than a generic
/// body-deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinateInput {
    pub lat: Option<Value>,
    pub lng: Option<Value>,
}

impl CoordinateInput {
    /// Both fields must be present and numeric; anything else is invalid.
    pub fn validate(&self) -> Option<Coordinate> {
        let lat = self.lat.as_ref()?.as_f64()?;
        let lng = self.lng.as_ref()?.as_f64()?;
        Some(Coordinate { lat, lng })
    }
}

/// Distance unit selector for route generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kilometers,
    Miles,
    Nauticalmiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(raw: &str) -> CoordinateInput {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn numeric_coordinates_validate() {
        let coordinate = input(r#"{"lat": 51.9, "lng": 4.05}"#).validate().unwrap();
        assert_eq!(coordinate.lat, 51.9);
        assert_eq!(coordinate.lng, 4.05);
    }

    #[test]
    fn integer_coordinates_validate() {
        assert!(input(r#"{"lat": 51, "lng": 4}"#).validate().is_some());
    }

    #[test]
    fn string_latitude_is_rejected() {
        assert!(input(r#"{"lat": "a", "lng": 1}"#).validate().is_none());
    }

    #[test]
    fn missing_longitude_is_rejected() {
        assert!(input(r#"{"lat": 51.9}"#).validate().is_none());
    }

    #[test]
    fn unit_defaults_to_kilometers() {
        assert_eq!(Unit::default(), Unit::Kilometers);
        let unit: Unit = serde_json::from_str(r#""nauticalmiles""#).unwrap();
        assert_eq!(unit, Unit::Nauticalmiles);
    }
}
