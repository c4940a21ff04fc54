//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log sites via the trace layer
//! - Metrics are cheap (atomic increments); modules record inline
//! - `RUST_LOG` always wins over the configured log level

pub mod logging;
pub mod metrics;
