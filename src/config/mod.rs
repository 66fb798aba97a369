//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! caller-supplied ServerConfig (builder or struct literal)
//!     → validation.rs (fail fast, first offending field wins)
//!     → server assembler (http::server)
//! ```
//!
//! # Design Decisions
//! - Configuration is immutable once the server is built
//! - Optional fields carry documented defaults, resolved at the builder
//! - Validation names the offending field and the expected shape

pub mod schema;
pub mod validation;

pub use schema::{ApiConfig, ExtraRoute, ServerConfig, ServerConfigBuilder};
pub use validation::ConfigError;
