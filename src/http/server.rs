//! Server assembly.
//!
//! # Responsibilities
//! - Validate the configuration before anything is constructed
//! - Wire the middleware chain in its fixed order: access log → CORS →
//!   compression → security headers → body limit → header stamping
//! - Mount one sub-router per API version, extra routes, optional static
//!   files, and the terminal 404 fallback
//!
//! # Design Decisions
//! - Construction either returns a complete application or fails
//!   synchronously; there is no partially assembled state
//! - Binding a listener stays with the caller; `run` is a convenience

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::entity::ApiError;
use crate::api::router::api_router;
use crate::config::schema::ServerConfig;
use crate::config::validation::{self, ConfigError};
use crate::dispatch::backend::DispatchError;
use crate::http::response::not_found;
use crate::observability::logging::{self, LoggerOptions};
use crate::security::cors::cors_layer;
use crate::security::headers::{origin_resource_policy, security_headers};

/// Branding header stamped on every response.
pub const POWERED_BY_HEADER: &str = "x-powered-by";

/// Version header stamped on every response.
pub const VERSION_HEADER: &str = "x-version";

/// Anything that can abort server construction.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// The built application: an assembled router tagged with its name,
/// version, and the resolved logger options.
#[derive(Debug)]
pub struct OpenApiServer {
    name: String,
    version: String,
    logger: LoggerOptions,
    router: Router,
}

impl OpenApiServer {
    /// Build the application from a configuration.
    ///
    /// Fails synchronously on the first invalid configuration field,
    /// descriptor field, or unbindable specification.
    pub fn build(config: ServerConfig) -> Result<Self, BuildError> {
        validation::validate(&config)?;

        let ServerConfig {
            name,
            version,
            apis,
            powered_by,
            static_folder,
            limit,
            logger,
            origin,
            routes,
        } = config;

        logging::init(&logger);

        let limit_bytes = validation::parse_limit(&limit)
            .filter(|bytes| *bytes > 0)
            .ok_or(ConfigError {
                field: "limit",
                expected: "size string",
            })?;
        let powered_by_value = HeaderValue::from_str(&powered_by).map_err(|_| ConfigError {
            field: "powered_by",
            expected: "header-safe string",
        })?;
        let version_value = HeaderValue::from_str(&version).map_err(|_| ConfigError {
            field: "version",
            expected: "header-safe string",
        })?;

        let mut router = Router::new();

        for api in apis {
            let mount = format!("/{}", api.version);
            let sub_router = api_router(api)?;
            router = router.nest(&mount, sub_router);
        }

        for route in routes {
            router = router.route(&route.path, route.handler);
        }

        router = match &static_folder {
            Some(folder) => router.fallback_service(
                ServeDir::new(folder).not_found_service(not_found.into_service()),
            ),
            None => router.fallback(not_found),
        };

        let policy = origin_resource_policy(&origin);
        let router = router.layer(
            ServiceBuilder::new()
                .layer(cors_layer(&origin))
                .layer(CompressionLayer::new())
                .layer(middleware::from_fn_with_state(policy, security_headers))
                .layer(DefaultBodyLimit::max(limit_bytes))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static(POWERED_BY_HEADER),
                    powered_by_value,
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static(VERSION_HEADER),
                    version_value,
                )),
        );

        let router = if logger.access_log {
            logging::with_access_log(router)
        } else {
            router
        };

        Ok(Self {
            name,
            version,
            logger,
            router,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Logger options the application was built with.
    pub fn logger_options(&self) -> &LoggerOptions {
        &self.logger
    }

    /// A clone of the assembled router, e.g. for driving with `tower`
    /// services in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Consume the server into its router for custom serving setups.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on an already-bound listener until ctrl-c.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            name = %self.name,
            version = %self.version,
            "OpenAPI server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("OpenAPI server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
