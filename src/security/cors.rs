//! Cross-origin request policy.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer for the configured origin.
///
/// The wildcard origin allows any caller; a concrete origin is echoed back
/// verbatim. Configuration validation guarantees the origin parses as a
/// header value; an origin that still fails to parse yields a layer that
/// allows no origins.
pub fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_for_wildcard_and_concrete_origins() {
        let _ = cors_layer("*");
        let _ = cors_layer("https://localhost");
    }
}
