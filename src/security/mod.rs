//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (cross-origin policy from the configured origin)
//!     → headers.rs (hardening headers stamped on the response)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Wildcard origin relaxes the cross-origin resource policy; any concrete
//!   origin locks it to same-origin
//! - Headers are stamped on every response, error responses included

pub mod cors;
pub mod headers;

pub use cors::cors_layer;
pub use headers::{origin_resource_policy, security_headers, OriginResourcePolicy};
