//! Controller contract for dispatched operations.
//!
//! A controller is the caller-supplied async function behind one
//! `operationId`. It receives the already-extracted request pieces and
//! returns a status code plus JSON body; transport concerns stay out of it.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use futures_util::future::BoxFuture;
use serde_json::Value;

/// Error type controllers are allowed to fail with.
pub type ControllerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The request pieces handed to a controller.
#[derive(Debug, Clone, Default)]
pub struct OperationRequest {
    /// Path template parameters (`/pets/{id}` → `id`).
    pub params: HashMap<String, String>,

    /// Query string parameters.
    pub query: HashMap<String, String>,

    /// Request headers.
    pub headers: HeaderMap,

    /// Parsed JSON body, when one was sent.
    pub body: Option<Value>,
}

/// What a controller produces: a status code and a JSON body.
#[derive(Debug, Clone)]
pub struct ControllerResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ControllerResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// A response with an explicit status code.
    pub fn with_status(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// An operation handler.
///
/// Implemented for any `Fn(OperationRequest) -> Future<Output =
/// Result<ControllerResponse, ControllerError>>` closure, so plain async
/// functions register directly.
pub trait Controller: Send + Sync + 'static {
    fn handle(
        &self,
        request: OperationRequest,
    ) -> BoxFuture<'static, Result<ControllerResponse, ControllerError>>;
}

impl<F, Fut> Controller for F
where
    F: Fn(OperationRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ControllerResponse, ControllerError>> + Send + 'static,
{
    fn handle(
        &self,
        request: OperationRequest,
    ) -> BoxFuture<'static, Result<ControllerResponse, ControllerError>> {
        Box::pin((self)(request))
    }
}

/// Mapping from `operationId` to controller.
#[derive(Clone, Default)]
pub struct ControllerMap {
    inner: HashMap<String, Arc<dyn Controller>>,
}

impl ControllerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller under an operation id, builder style.
    pub fn register(
        mut self,
        operation_id: impl Into<String>,
        controller: impl Controller,
    ) -> Self {
        self.inner.insert(operation_id.into(), Arc::new(controller));
        self
    }

    pub fn get(&self, operation_id: &str) -> Option<&Arc<dyn Controller>> {
        self.inner.get(operation_id)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for ControllerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn closures_are_controllers() {
        let map = ControllerMap::new().register("getStatus", |_request: OperationRequest| async {
            Ok(ControllerResponse::ok(json!({ "message": "ok" })))
        });

        let controller = map.get("getStatus").expect("registered");
        let response = controller
            .handle(OperationRequest::default())
            .await
            .expect("controller succeeds");

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "ok");
    }

    #[test]
    fn debug_lists_operation_ids() {
        let map = ControllerMap::new().register("getPet", |_request: OperationRequest| async {
            Ok(ControllerResponse::ok(json!({})))
        });
        assert!(format!("{map:?}").contains("getPet"));
    }
}
