//! Security response headers.
//!
//! # Responsibilities
//! - Derive the cross-origin resource policy from the configured origin
//! - Stamp the hardening header set on every response
//!
//! # Design Decisions
//! - No content-security-policy header: the documentation UI loads its
//!   bundle from a CDN and would be blocked by a self-only policy

use axum::extract::{Request, State};
use axum::http::{header::HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

/// Cross-origin resource policy derived from the configured CORS origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginResourcePolicy {
    /// Resources may be embedded cross-origin (wildcard origin).
    CrossOrigin,
    /// Resources are only served to the same origin (concrete origin).
    SameOrigin,
}

impl OriginResourcePolicy {
    /// Header value for `cross-origin-resource-policy`.
    pub fn as_str(self) -> &'static str {
        match self {
            OriginResourcePolicy::CrossOrigin => "cross-origin",
            OriginResourcePolicy::SameOrigin => "same-origin",
        }
    }
}

/// Map a configured origin onto a resource policy.
///
/// A wildcard origin keeps resources embeddable from anywhere; anything
/// else locks them to the serving origin.
pub fn origin_resource_policy(origin: &str) -> OriginResourcePolicy {
    if origin == "*" {
        OriginResourcePolicy::CrossOrigin
    } else {
        OriginResourcePolicy::SameOrigin
    }
}

const STATIC_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "0"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("referrer-policy", "no-referrer"),
    ("x-dns-prefetch-control", "off"),
    ("x-permitted-cross-domain-policies", "none"),
    ("cross-origin-opener-policy", "same-origin"),
];

/// Middleware stamping the hardening header set on every response.
///
/// The `cross-origin-resource-policy` value comes from the policy derived
/// at build time via [`origin_resource_policy`].
pub async fn security_headers(
    State(policy): State<OriginResourcePolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for &(name, value) in STATIC_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static(policy.as_str()),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_origin_is_cross_origin() {
        assert_eq!(
            origin_resource_policy("*"),
            OriginResourcePolicy::CrossOrigin
        );
    }

    #[test]
    fn concrete_origin_is_same_origin() {
        assert_eq!(
            origin_resource_policy("https://localhost"),
            OriginResourcePolicy::SameOrigin
        );
        assert_eq!(
            origin_resource_policy("https://example.com"),
            OriginResourcePolicy::SameOrigin
        );
    }
}
