//! Operation dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! OpenAPI specification (paths → operations → operationId)
//!     → backend.rs (bind each operation to its controller on a Router)
//!     → controller.rs (caller-supplied handler produces {status, body})
//!     → JSON response
//! ```
//!
//! # Design Decisions
//! - Request matching is delegated to axum's router; OpenAPI path templates
//!   are valid axum route syntax verbatim
//! - Payload schemas are compiled once at build time, never per request
//! - Controller failures never escape: they are logged and become the
//!   500 envelope

pub mod backend;
pub mod controller;

pub use backend::{DispatchError, DispatchOptions, OperationBackend};
pub use controller::{
    Controller, ControllerError, ControllerMap, ControllerResponse, OperationRequest,
};
