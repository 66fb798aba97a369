//! Configuration validation.
//!
//! # Responsibilities
//! - Check the value-level shape of a [`ServerConfig`] before assembly
//! - Name the first offending field and the shape it should have
//!
//! # Design Decisions
//! - Presence of required fields is the builder's/type system's job; what
//!   remains here are value checks (emptiness, parseability, header safety)
//! - Fail fast: the first offending field aborts, nothing is collected

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A configuration field with the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid api details, field {field} should be a {expected}")]
pub struct ConfigError {
    pub field: &'static str,
    pub expected: &'static str,
}

/// Validate a configuration, returning the first offending field.
pub fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError {
            field: "name",
            expected: "non-empty string",
        });
    }

    if config.version.trim().is_empty() || HeaderValue::from_str(&config.version).is_err() {
        return Err(ConfigError {
            field: "version",
            expected: "header-safe string",
        });
    }

    if config.powered_by.is_empty() || HeaderValue::from_str(&config.powered_by).is_err() {
        return Err(ConfigError {
            field: "powered_by",
            expected: "header-safe string",
        });
    }

    match parse_limit(&config.limit) {
        Some(bytes) if bytes > 0 => {}
        _ => {
            return Err(ConfigError {
                field: "limit",
                expected: "size string",
            });
        }
    }

    if config.origin != "*"
        && (config.origin.is_empty() || config.origin.parse::<HeaderValue>().is_err())
    {
        return Err(ConfigError {
            field: "origin",
            expected: "origin string",
        });
    }

    if let Some(folder) = &config.static_folder {
        if folder.as_os_str().is_empty() {
            return Err(ConfigError {
                field: "static_folder",
                expected: "path",
            });
        }
    }

    if config.routes.iter().any(|route| !route.path.starts_with('/')) {
        return Err(ConfigError {
            field: "routes",
            expected: "path starting with a slash",
        });
    }

    Ok(())
}

/// Parse a body-size string: a raw byte count or a `kb`/`mb`/`gb` suffixed
/// value, case-insensitive (`"100mb"`, `"512KB"`, `"1048576"`).
pub fn parse_limit(limit: &str) -> Option<usize> {
    let normalized = limit.trim().to_ascii_lowercase();

    let (number, multiplier) = if let Some(number) = normalized.strip_suffix("gb") {
        (number, 1024 * 1024 * 1024)
    } else if let Some(number) = normalized.strip_suffix("mb") {
        (number, 1024 * 1024)
    } else if let Some(number) = normalized.strip_suffix("kb") {
        (number, 1024)
    } else if let Some(number) = normalized.strip_suffix('b') {
        (number, 1)
    } else {
        (normalized.as_str(), 1)
    };

    let value: usize = number.trim().parse().ok()?;
    value.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExtraRoute;

    fn valid_config() -> ServerConfig {
        ServerConfig::builder()
            .name("test")
            .version("v1")
            .build()
            .expect("minimal config is valid")
    }

    #[test]
    fn accepts_a_minimal_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let mut config = valid_config();
        config.name = "  ".to_string();
        assert_eq!(validate(&config).unwrap_err().field, "name");
    }

    #[test]
    fn rejects_unparsable_limit() {
        let mut config = valid_config();
        config.limit = "tenmb".to_string();
        let error = validate(&config).unwrap_err();
        assert_eq!(error.field, "limit");
        assert_eq!(error.expected, "size string");
    }

    #[test]
    fn rejects_empty_static_folder() {
        let mut config = valid_config();
        config.static_folder = Some(Default::default());
        assert_eq!(validate(&config).unwrap_err().field, "static_folder");
    }

    #[test]
    fn rejects_route_without_leading_slash() {
        let mut config = valid_config();
        config.routes.push(ExtraRoute::new(
            "ping",
            axum::routing::get(|| async { "pong" }),
        ));
        assert_eq!(validate(&config).unwrap_err().field, "routes");
    }

    #[test]
    fn parses_size_strings() {
        assert_eq!(parse_limit("100mb"), Some(100 * 1024 * 1024));
        assert_eq!(parse_limit("512KB"), Some(512 * 1024));
        assert_eq!(parse_limit("1gb"), Some(1024 * 1024 * 1024));
        assert_eq!(parse_limit("2048"), Some(2048));
        assert_eq!(parse_limit("64b"), Some(64));
        assert_eq!(parse_limit("tenmb"), None);
        assert_eq!(parse_limit(""), None);
    }
}
