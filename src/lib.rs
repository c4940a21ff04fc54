//! Sea-route segment lookup service.
//!
//! Serves maritime route segments through a read-through cache chain
//! (Redis → ClickHouse) and generates routes via an external provider.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌────────────────────────────────────────────────┐
//!                        │               SEGMENT SERVICE                  │
//!                        │                                                │
//!   GET /segment-lookup  │  ┌───────┐   ┌─────────┐    ┌──────────────┐  │
//!   ─────────────────────┼─▶│ http  │──▶│ lookup  │───▶│    cache     │──┼──── Redis
//!                        │  │ server│   │ service │    │ (cooldown    │  │
//!                        │  └───────┘   └────┬────┘    │  gate)       │  │
//!                        │                   │ miss    └──────────────┘  │
//!                        │                   ▼                           │
//!                        │             ┌──────────────┐                  │
//!                        │             │    store     │──────────────────┼──── ClickHouse
//!                        │             └──────────────┘                  │
//!                        │                                               │
//!   POST /route-         │  ┌───────┐   ┌──────────────┐                 │
//!   generation           │  │ http  │──▶│   provider   │─────────────────┼──── Routing engine
//!   ─────────────────────┼─▶│ server│   └──────────────┘                 │
//!                        │  └───────┘                                    │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐  │
//!                        │  │          Cross-Cutting Concerns         │  │
//!                        │  │  config · observability · lifecycle ·   │  │
//!                        │  │  resilience (cooldown gate)             │  │
//!                        │  └─────────────────────────────────────────┘  │
//!                        └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod geo;
pub mod http;
pub mod lookup;
pub mod segment;

// External collaborators
pub mod cache;
pub mod provider;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use lookup::SegmentLookupService;
