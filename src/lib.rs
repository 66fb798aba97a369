//! Preconfigured Axum servers from OpenAPI specifications.
//!
//! One build call turns a configuration — a name, a version, and a list of
//! API descriptors — into a ready-to-serve application: per-version
//! sub-routers exposing a documentation UI (`/{version}/swagger`), the raw
//! specification (`/{version}/api-docs`), and operation dispatch to
//! caller-supplied controllers, all behind a fixed middleware chain (access
//! logging, CORS, compression, security headers, body-size limit, response
//! header stamping) with a structured JSON 404 fallback.
//!
//! ```no_run
//! use openapi_axum::{
//!     ApiConfig, ControllerMap, ControllerResponse, OpenApiServer, OperationRequest,
//!     ServerConfig,
//! };
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let specification = json!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": {
//!         "/status": {
//!             "get": {
//!                 "operationId": "getStatus",
//!                 "responses": { "200": { "description": "ok" } }
//!             }
//!         }
//!     }
//! });
//!
//! let controllers =
//!     ControllerMap::new().register("getStatus", |_request: OperationRequest| async {
//!         Ok(ControllerResponse::ok(json!({ "message": "ok" })))
//!     });
//!
//! let server = OpenApiServer::build(
//!     ServerConfig::builder()
//!         .name("pets")
//!         .version("1.0.0")
//!         .api(ApiConfig::new("v1", specification, controllers))
//!         .build()?,
//! )?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! server.run(listener).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod observability;
pub mod security;

pub use api::entity::{Api, ApiError};
pub use config::schema::{ApiConfig, ExtraRoute, ServerConfig, ServerConfigBuilder};
pub use config::validation::ConfigError;
pub use dispatch::controller::{
    Controller, ControllerError, ControllerMap, ControllerResponse, OperationRequest,
};
pub use http::server::{BuildError, OpenApiServer};
pub use observability::logging::{LogFormat, LoggerOptions};
pub use security::headers::{origin_resource_policy, OriginResourcePolicy};
