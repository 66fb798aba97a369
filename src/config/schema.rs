//! Configuration schema definitions.
//!
//! The top-level [`ServerConfig`] describes one server; each [`ApiConfig`]
//! describes one mounted API version. Controllers and extra-route handlers
//! are live objects, so these structs are plain Rust rather than serde
//! documents.

use std::fmt;
use std::path::PathBuf;

use axum::routing::MethodRouter;
use serde_json::Value;

use crate::config::validation::{self, ConfigError};
use crate::dispatch::controller::ControllerMap;
use crate::observability::logging::LoggerOptions;

/// Branding header value stamped when none is configured.
pub const DEFAULT_POWERED_BY: &str = "openapi-axum";

/// Request body cap applied when none is configured.
pub const DEFAULT_BODY_LIMIT: &str = "100mb";

/// CORS origin applied when none is configured.
pub const DEFAULT_ORIGIN: &str = "*";

/// One API descriptor: a version prefix, its specification document, and
/// the controllers behind its operations.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Path-prefix version string (`v1` mounts at `/v1`).
    pub version: String,

    /// The OpenAPI document; opaque to this crate beyond `paths`.
    pub specification: Value,

    /// Operation id → controller.
    pub controllers: ControllerMap,

    /// Shared secret required in `x-api-key` when set.
    pub secret: Option<String>,

    /// Validate request bodies against the specification.
    pub request_validation: bool,

    /// Validate controller responses against the specification.
    pub response_validation: bool,
}

impl ApiConfig {
    pub fn new(
        version: impl Into<String>,
        specification: Value,
        controllers: ControllerMap,
    ) -> Self {
        Self {
            version: version.into(),
            specification,
            controllers,
            secret: None,
            request_validation: false,
            response_validation: false,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_request_validation(mut self, enabled: bool) -> Self {
        self.request_validation = enabled;
        self
    }

    pub fn with_response_validation(mut self, enabled: bool) -> Self {
        self.response_validation = enabled;
        self
    }
}

/// A manually supplied route mounted outside any specification.
#[derive(Clone)]
pub struct ExtraRoute {
    /// Route path, axum syntax, must start with a slash.
    pub path: String,

    /// Handler(s) for the path.
    pub handler: MethodRouter,
}

impl ExtraRoute {
    pub fn new(path: impl Into<String>, handler: MethodRouter) -> Self {
        Self {
            path: path.into(),
            handler,
        }
    }
}

impl fmt::Debug for ExtraRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraRoute")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Root configuration for one server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name, kept on the built application.
    pub name: String,

    /// Server version, stamped in the `x-version` response header.
    pub version: String,

    /// One entry per mounted API version.
    pub apis: Vec<ApiConfig>,

    /// Branding value for the `x-powered-by` response header.
    pub powered_by: String,

    /// Directory served as static files after all routes.
    pub static_folder: Option<PathBuf>,

    /// Request body size cap, e.g. `"100mb"`.
    pub limit: String,

    /// Logger configuration.
    pub logger: LoggerOptions,

    /// CORS origin; `"*"` for any caller.
    pub origin: String,

    /// Manually supplied routes, mounted after the API sub-routers.
    pub routes: Vec<ExtraRoute>,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Fluent builder for [`ServerConfig`].
///
/// `name` and `version` are required; everything else carries the
/// documented default.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    name: Option<String>,
    version: Option<String>,
    apis: Vec<ApiConfig>,
    powered_by: Option<String>,
    static_folder: Option<PathBuf>,
    limit: Option<String>,
    logger: Option<LoggerOptions>,
    origin: Option<String>,
    routes: Vec<ExtraRoute>,
}

impl ServerConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add one API descriptor.
    pub fn api(mut self, api: ApiConfig) -> Self {
        self.apis.push(api);
        self
    }

    pub fn powered_by(mut self, powered_by: impl Into<String>) -> Self {
        self.powered_by = Some(powered_by.into());
        self
    }

    pub fn static_folder(mut self, static_folder: impl Into<PathBuf>) -> Self {
        self.static_folder = Some(static_folder.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn logger(mut self, logger: LoggerOptions) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Add one manually supplied route.
    pub fn route(mut self, path: impl Into<String>, handler: MethodRouter) -> Self {
        self.routes.push(ExtraRoute::new(path, handler));
        self
    }

    /// Resolve defaults and validate; the first offending field aborts.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let name = self.name.ok_or(ConfigError {
            field: "name",
            expected: "string",
        })?;
        let version = self.version.ok_or(ConfigError {
            field: "version",
            expected: "string",
        })?;

        let config = ServerConfig {
            name,
            version,
            apis: self.apis,
            powered_by: self
                .powered_by
                .unwrap_or_else(|| DEFAULT_POWERED_BY.to_string()),
            static_folder: self.static_folder,
            limit: self.limit.unwrap_or_else(|| DEFAULT_BODY_LIMIT.to_string()),
            logger: self.logger.unwrap_or_else(LoggerOptions::from_env),
            origin: self.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            routes: self.routes,
        };

        validation::validate(&config)?;
        Ok(config)
    }
}
