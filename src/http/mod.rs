//! HTTP assembly subsystem.
//!
//! # Data Flow
//! ```text
//! validated ServerConfig
//!     → server.rs (middleware chain, API sub-routers, static files, 404)
//!     → axum Router, returned to the caller
//! ```

pub mod response;
pub mod server;

pub use response::ErrorBody;
pub use server::{BuildError, OpenApiServer};
