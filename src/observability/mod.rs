//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; one subscriber per process
//! - Log level resolved once from options and environment, `RUST_LOG` wins
//! - Access logging is opt-in and rides on `tower-http`'s `TraceLayer`

pub mod logging;

pub use logging::{LogFormat, LoggerOptions};
