//! External route provider.
//!
//! Route computation is delegated entirely to an external engine; this
//! module only wraps it. The provider is treated as unreliable: callers see
//! either a polyline, an explicit "no route", or an error they are expected
//! to normalize into an empty route.

mod http;

pub use http::HttpRouteProvider;

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::{Coordinate, Unit};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("route provider request failed: {0}")]
    Request(String),
    #[error("route provider returned status {0}")]
    Status(u16),
    #[error("route provider returned an unreadable body: {0}")]
    Body(String),
}

/// Black-box mapping from (origin, destination, unit) to a polyline.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Compute a route. `Ok(None)` means the provider answered but produced
    /// no usable line geometry.
    async fn compute(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        unit: Unit,
    ) -> Result<Option<Vec<[f64; 2]>>, ProviderError>;
}
