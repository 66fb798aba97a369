//! Per-API descriptor validation and sub-router construction.
//!
//! # Data Flow
//! ```text
//! ApiConfig (raw descriptor)
//!     → entity.rs (validate each field at assignment, fail fast)
//!     → router.rs (docs UI + raw spec endpoint + dispatch fallback)
//!     → mounted by the server assembler under /{version}
//! ```

pub mod entity;
pub mod router;

pub use entity::{Api, ApiError};
pub use router::api_router;
