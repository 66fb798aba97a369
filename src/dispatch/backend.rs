//! Binds OpenAPI operations to controllers on an inner router.
//!
//! # Responsibilities
//! - Walk the specification's `paths` object and register one route per
//!   operation that has both an `operationId` and a mapped controller
//! - Enforce the shared secret, parse the JSON body, run the optional
//!   request/response schema validation, invoke the controller
//!
//! # Design Decisions
//! - Matching is axum's job: OpenAPI templates (`/pets/{id}`) are valid
//!   route syntax as-is
//! - Operations that cannot be bound are skipped with a warning and fall
//!   through to the 404 envelope
//! - Schemas compile once at build time; a schema that does not compile
//!   aborts construction

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use axum::{Json, Router};
use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;

use crate::dispatch::controller::{Controller, ControllerMap, OperationRequest};
use crate::http::response::{error_response, not_found, validation_error_response};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Everything the backend needs to bind one API's operations.
pub struct DispatchOptions {
    /// The OpenAPI document, structurally opaque beyond `paths`.
    pub specification: Value,
    pub controllers: ControllerMap,
    pub secret: Option<String>,
    pub request_validation: bool,
    pub response_validation: bool,
}

/// Malformed specification discovered while binding operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A `paths` key does not start with a slash.
    #[error("path {path} does not start with a slash")]
    InvalidPath { path: String },

    /// A `paths` entry is not an object.
    #[error("path item for {path} is not an object")]
    InvalidPathItem { path: String },

    /// A request or response body schema failed to compile.
    #[error("invalid {kind} schema for operation {operation_id}: {message}")]
    InvalidSchema {
        operation_id: String,
        kind: &'static str,
        message: String,
    },
}

const METHODS: &[(&str, MethodFilter)] = &[
    ("get", MethodFilter::GET),
    ("put", MethodFilter::PUT),
    ("post", MethodFilter::POST),
    ("delete", MethodFilter::DELETE),
    ("options", MethodFilter::OPTIONS),
    ("head", MethodFilter::HEAD),
    ("patch", MethodFilter::PATCH),
    ("trace", MethodFilter::TRACE),
];

/// One bound operation, shared with its handler closure.
struct BoundOperation {
    operation_id: String,
    controller: Arc<dyn Controller>,
    secret: Option<Arc<str>>,
    request_schema: Option<Arc<JSONSchema>>,
    response_schema: Option<Arc<JSONSchema>>,
}

/// The dispatch backend: one router holding every bound operation.
#[derive(Debug)]
pub struct OperationBackend {
    router: Router,
    operations: usize,
}

impl OperationBackend {
    /// Bind the specification's operations to their controllers.
    ///
    /// A specification without a `paths` object binds nothing; every request
    /// then receives the 404 envelope.
    pub fn new(options: DispatchOptions) -> Result<Self, DispatchError> {
        let DispatchOptions {
            specification,
            controllers,
            secret,
            request_validation,
            response_validation,
        } = options;
        let secret: Option<Arc<str>> = secret.map(Into::into);

        let mut router = Router::new();
        let mut operations = 0;

        let paths = specification
            .get("paths")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        for (path, item) in &paths {
            if !path.starts_with('/') {
                return Err(DispatchError::InvalidPath { path: path.clone() });
            }
            let item = item
                .as_object()
                .ok_or_else(|| DispatchError::InvalidPathItem { path: path.clone() })?;

            let mut method_router = MethodRouter::new();
            let mut bound = 0;

            for &(method, filter) in METHODS {
                let Some(operation) = item.get(method) else {
                    continue;
                };
                let Some(operation_id) = operation.get("operationId").and_then(Value::as_str)
                else {
                    tracing::warn!(path = %path, method = %method, "operation without operationId, skipping");
                    continue;
                };
                let Some(controller) = controllers.get(operation_id) else {
                    tracing::warn!(operation_id = %operation_id, "no controller mapped for operation, skipping");
                    continue;
                };

                let request_schema = if request_validation {
                    compile_schema(
                        &specification,
                        request_body_schema(operation),
                        operation_id,
                        "request",
                    )?
                } else {
                    None
                };
                let response_schema = if response_validation {
                    compile_schema(
                        &specification,
                        response_body_schema(operation),
                        operation_id,
                        "response",
                    )?
                } else {
                    None
                };

                let bound_operation = Arc::new(BoundOperation {
                    operation_id: operation_id.to_string(),
                    controller: controller.clone(),
                    secret: secret.clone(),
                    request_schema,
                    response_schema,
                });

                method_router = method_router.on(
                    filter,
                    move |Path(params): Path<HashMap<String, String>>,
                          Query(query): Query<HashMap<String, String>>,
                          headers: HeaderMap,
                          body: Bytes| {
                        let operation = bound_operation.clone();
                        async move { dispatch(operation, params, query, headers, body).await }
                    },
                );
                bound += 1;
            }

            if bound > 0 {
                router = router.route(path, method_router);
                operations += bound;
            }
        }

        Ok(Self {
            router: router.fallback(not_found),
            operations,
        })
    }

    /// Number of operations that were bound to a controller.
    pub fn operations(&self) -> usize {
        self.operations
    }

    /// Hand the assembled router to the sub-router.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Handle one dispatched request end to end.
async fn dispatch(
    operation: Arc<BoundOperation>,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = &operation.secret {
        let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if presented != Some(secret.as_ref()) {
            return error_response(StatusCode::UNAUTHORIZED, "Unauthorized.");
        }
    }

    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body."),
        }
    };

    if let (Some(schema), Some(value)) = (&operation.request_schema, &body) {
        if let Err(errors) = schema.validate(value) {
            let details: Vec<String> = errors.map(|error| error.to_string()).collect();
            return validation_error_response("Request validation failed.", details);
        }
    }

    let request = OperationRequest {
        params,
        query,
        headers,
        body,
    };

    match operation.controller.handle(request).await {
        Ok(response) => {
            if let Some(schema) = &operation.response_schema {
                if response.status.is_success() {
                    if let Err(errors) = schema.validate(&response.body) {
                        let details: Vec<String> =
                            errors.map(|error| error.to_string()).collect();
                        tracing::error!(
                            operation_id = %operation.operation_id,
                            details = ?details,
                            "response validation failed"
                        );
                        return error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "Internal server error.",
                        );
                    }
                }
            }
            (response.status, Json(response.body)).into_response()
        }
        Err(error) => {
            tracing::error!(
                operation_id = %operation.operation_id,
                error = %error,
                "controller failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}

/// Compile an operation body schema, grafting the document's `components`
/// in so local `$ref` pointers stay resolvable.
fn compile_schema(
    specification: &Value,
    schema: Option<&Value>,
    operation_id: &str,
    kind: &'static str,
) -> Result<Option<Arc<JSONSchema>>, DispatchError> {
    let Some(schema) = schema else {
        return Ok(None);
    };

    let mut schema = schema.clone();
    if let (Some(object), Some(components)) =
        (schema.as_object_mut(), specification.get("components"))
    {
        object
            .entry("components")
            .or_insert_with(|| components.clone());
    }

    match JSONSchema::compile(&schema) {
        Ok(compiled) => Ok(Some(Arc::new(compiled))),
        Err(error) => Err(DispatchError::InvalidSchema {
            operation_id: operation_id.to_string(),
            kind,
            message: error.to_string(),
        }),
    }
}

fn request_body_schema(operation: &Value) -> Option<&Value> {
    operation
        .get("requestBody")?
        .get("content")?
        .get("application/json")?
        .get("schema")
}

fn response_body_schema(operation: &Value) -> Option<&Value> {
    let responses = operation.get("responses")?;
    let success = responses
        .get("200")
        .or_else(|| responses.get("201"))
        .or_else(|| responses.get("default"))?;
    success.get("content")?.get("application/json")?.get("schema")
}
