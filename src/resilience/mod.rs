//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Cache operation:
//!     → cooldown.rs (gate: is the cache currently considered absent?)
//!     → bounded tokio timeout around the redis call
//!     → On failure: gate closes for the cooldown interval
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No automatic retries anywhere on the read path; a failed stage falls
//!   through to the next one instead
//! - The gate tracks elapsed time only, never failure rates

pub mod cooldown;

pub use cooldown::CooldownGate;
