//! HTTP error payloads.
//!
//! # Responsibilities
//! - Map domain failures to HTTP status codes
//! - Serialize the `{"error": ...}` envelope
//! - Keep internal detail in the log, never in a 500 body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::segment::KeyError;
use crate::store::StoreError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid origin/destination coordinates")]
    InvalidCoordinates,

    #[error("Origin and destination ports cannot be the same")]
    SamePorts,

    #[error("originPortId and destinationPortId are required")]
    MissingPorts,

    #[error("Internal server error")]
    Store(#[source] StoreError),
}

/// Standard error envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<KeyError> for ApiError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::Equal => Self::SamePorts,
            KeyError::Empty => Self::MissingPorts,
        }
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCoordinates | Self::SamePorts | Self::MissingPorts => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::error!(error = %e, "Durable store failure surfaced to caller");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_map_to_400() {
        assert_eq!(ApiError::InvalidCoordinates.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::SamePorts.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingPorts.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_500_with_generic_message() {
        let error = ApiError::from(StoreError::Unavailable("connection refused".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Internal server error");
    }

    #[test]
    fn key_errors_map_to_specific_messages() {
        assert_eq!(
            ApiError::from(KeyError::Equal).to_string(),
            "Origin and destination ports cannot be the same"
        );
    }
}
