//! Structured logging setup and per-request access logging.
//!
//! # Responsibilities
//! - Resolve logger options from the environment (`LOGLEVEL` / `LOG_LEVEL`,
//!   optionally supplied through a `.env` file)
//! - Install the process-wide `tracing` subscriber
//! - Provide the access-log layer attached by the server assembler
//!
//! # Design Decisions
//! - `RUST_LOG` takes precedence over the configured level
//! - Installation is idempotent so repeated builds (tests) don't panic

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither the options nor the environment specify one.
pub const DEFAULT_LEVEL: &str = "info";

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation.
    Json,
}

/// Logger configuration carried in [`ServerConfig`](crate::config::schema::ServerConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Log level directive (`trace`..`error`).
    pub level: String,

    /// Subscriber output format.
    pub format: LogFormat,

    /// Emit one `info` event per completed request.
    pub access_log: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            format: LogFormat::default(),
            access_log: false,
        }
    }
}

impl LoggerOptions {
    /// Resolve options from the environment.
    ///
    /// Loads a `.env` file when present, then reads `LOGLEVEL` (falling back
    /// to `LOG_LEVEL`) for the level. Format and access logging keep their
    /// defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let level = std::env::var("LOGLEVEL")
            .or_else(|_| std::env::var("LOG_LEVEL"))
            .unwrap_or_else(|_| DEFAULT_LEVEL.to_string());

        Self {
            level,
            ..Self::default()
        }
    }
}

/// Install the global `tracing` subscriber for the given options.
///
/// A subscriber that is already installed wins; this is deliberate so that
/// building several servers in one process (or under a test harness) works.
pub fn init(options: &LoggerOptions) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&options.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match options.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }
}

/// Wrap the router with a per-request access log.
///
/// One span per request carrying the request line details, one `info` event
/// on completion with status and latency.
pub fn with_access_log(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                let user_agent = request
                    .headers()
                    .get(header::USER_AGENT)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-")
                    .to_owned();
                let forwarded_for = request
                    .headers()
                    .get("x-forwarded-for")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-")
                    .to_owned();

                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    url = %request.uri(),
                    http_version = ?request.version(),
                    user_agent = %user_agent,
                    forwarded_for = %forwarded_for,
                )
            })
            .on_response(
                |response: &Response<Body>, latency: Duration, _span: &Span| {
                    tracing::info!(
                        status = response.status().as_u16(),
                        response_time_ms = latency.as_millis() as u64,
                        "request completed"
                    );
                },
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = LoggerOptions::default();
        assert_eq!(options.level, "info");
        assert_eq!(options.format, LogFormat::Pretty);
        assert!(!options.access_log);
    }

    #[test]
    fn init_is_idempotent() {
        let options = LoggerOptions::default();
        init(&options);
        init(&options);
    }
}
