//! Construction-time behavior: configuration validation, descriptor
//! validation, and the attributes kept on the built application.

use openapi_axum::{
    origin_resource_policy, ApiConfig, BuildError, ControllerMap, OpenApiServer,
    OriginResourcePolicy, ServerConfig,
};
use serde_json::json;

mod common;

#[test]
fn built_server_keeps_its_name_and_version() {
    let config = ServerConfig::builder()
        .name("test")
        .version("v1")
        .build()
        .expect("minimal config is valid");
    let server = OpenApiServer::build(config).expect("builds");

    assert_eq!(server.name(), "test");
    assert_eq!(server.version(), "v1");
    assert_eq!(server.logger_options().level, "info");
}

#[test]
fn missing_name_is_named_in_the_error() {
    let error = ServerConfig::builder().version("v1").build().unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid api details, field name should be a string"
    );
}

#[test]
fn missing_version_is_named_in_the_error() {
    let error = ServerConfig::builder().name("test").build().unwrap_err();
    assert_eq!(error.field, "version");
}

#[test]
fn invalid_static_folder_is_named_in_the_error() {
    let error = ServerConfig::builder()
        .name("test")
        .version("v1")
        .static_folder("")
        .build()
        .unwrap_err();

    assert_eq!(error.field, "static_folder");
    assert_eq!(
        error.to_string(),
        "invalid api details, field static_folder should be a path"
    );
}

#[test]
fn invalid_limit_is_named_in_the_error() {
    let error = ServerConfig::builder()
        .name("test")
        .version("v1")
        .limit("tenmb")
        .build()
        .unwrap_err();

    assert_eq!(error.field, "limit");
    assert_eq!(error.expected, "size string");
}

#[test]
fn descriptor_errors_abort_the_build() {
    let config = ServerConfig::builder()
        .name("test")
        .version("v1")
        .api(ApiConfig::new("v1", json!(null), common::controllers()))
        .build()
        .expect("top-level config is valid");

    let error = OpenApiServer::build(config).unwrap_err();
    assert!(matches!(error, BuildError::Api(_)));
    assert_eq!(error.to_string(), "Invalid OpenAPI specification");
}

#[test]
fn empty_controllers_abort_the_build() {
    let config = ServerConfig::builder()
        .name("test")
        .version("v1")
        .api(ApiConfig::new(
            "v1",
            common::specification(),
            ControllerMap::new(),
        ))
        .build()
        .expect("top-level config is valid");

    let error = OpenApiServer::build(config).unwrap_err();
    assert_eq!(error.to_string(), "Invalid OpenAPI controllers");
}

#[test]
fn extra_routes_are_accepted() {
    let config = ServerConfig::builder()
        .name("test")
        .version("v1")
        .route("/ping", axum::routing::get(|| async { "pong" }))
        .build()
        .expect("config with extra route is valid");

    assert!(OpenApiServer::build(config).is_ok());
}

#[test]
fn wildcard_origin_maps_to_cross_origin_policy() {
    assert_eq!(
        origin_resource_policy("*"),
        OriginResourcePolicy::CrossOrigin
    );
}

#[test]
fn concrete_origin_maps_to_same_origin_policy() {
    assert_eq!(
        origin_resource_policy("https://localhost"),
        OriginResourcePolicy::SameOrigin
    );
}
