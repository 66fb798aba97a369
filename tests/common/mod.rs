//! Shared fixtures for the integration tests.

use std::net::SocketAddr;

use axum::Router;
use openapi_axum::{ControllerMap, ControllerResponse, OperationRequest};
use serde_json::{json, Value};

/// A small but real specification: a status endpoint, an echo endpoint with
/// a request-body schema, and one templated path.
pub fn specification() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": { "title": "Test API", "version": "1.2.3" },
        "paths": {
            "/status": {
                "get": {
                    "operationId": "getStatus",
                    "responses": { "200": { "description": "service status" } }
                }
            },
            "/test": {
                "post": {
                    "operationId": "postTest",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["message"],
                                    "properties": {
                                        "message": { "type": "string" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": { "200": { "description": "echo" } }
                }
            },
            "/pets/{id}": {
                "get": {
                    "operationId": "getPet",
                    "responses": { "200": { "description": "one pet" } }
                }
            }
        }
    })
}

pub fn controllers() -> ControllerMap {
    ControllerMap::new()
        .register("getStatus", |_request: OperationRequest| async {
            Ok(ControllerResponse::ok(json!({
                "status": true,
                "version": "1.2.3",
                "message": "ok"
            })))
        })
        .register("postTest", |request: OperationRequest| async move {
            Ok(ControllerResponse::ok(json!({
                "message": "ok",
                "received": request.body
            })))
        })
        .register("getPet", |request: OperationRequest| async move {
            match request.params.get("id") {
                Some(id) => Ok(ControllerResponse::ok(json!({ "id": id }))),
                None => Err("missing id".into()),
            }
        })
}

/// Serve the router on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    addr
}
