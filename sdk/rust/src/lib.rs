//! Rust client SDK for the sea-route segment service.

pub mod client;

pub use client::{
    CoordinatePair, LookupResponse, RouteRequest, RouteResponse, SegmentServiceClient,
};
