//! HTTP surface of the segment service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (stamp x-request-id)
//!     → routes.rs (validate input, call lookup/provider)
//!     → response.rs (map failures to status + error envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
