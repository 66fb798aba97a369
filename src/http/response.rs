//! Shared JSON response envelopes.
//!
//! Every error the built application produces itself (404 fallback, missing
//! secret, payload validation, controller failure) uses the same shape:
//! integer status, ISO-8601 timestamp, message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            timestamp: Utc::now(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// An enveloped error response.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(status, message))).into_response()
}

/// A 400 envelope carrying per-field validation details.
pub fn validation_error_response(message: &str, details: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new(StatusCode::BAD_REQUEST, message).with_details(details)),
    )
        .into_response()
}

/// Terminal fallback for anything no route matched.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_flat() {
        let body = ErrorBody::new(StatusCode::NOT_FOUND, "Not found.");
        let value = serde_json::to_value(&body).expect("serializes");

        assert_eq!(value["status"], 404);
        assert_eq!(value["message"], "Not found.");
        assert!(value["timestamp"].is_string());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_are_included_when_set() {
        let body = ErrorBody::new(StatusCode::BAD_REQUEST, "Request validation failed.")
            .with_details(vec!["message is required".to_string()]);
        let value = serde_json::to_value(&body).expect("serializes");

        assert_eq!(value["details"][0], "message is required");
    }
}
