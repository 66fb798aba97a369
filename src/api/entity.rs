//! Validated API descriptor.
//!
//! Every field is checked at assignment time, so an `Api` that exists is an
//! `Api` that can be mounted. `Api::create` applies the setters in a fixed
//! order and surfaces the first failure.

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::dispatch::controller::ControllerMap;
use crate::dispatch::DispatchOptions;

/// Descriptor field rejected by a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid OpenAPI version")]
    InvalidVersion,

    #[error("Invalid OpenAPI specification")]
    InvalidSpecification,

    #[error("Invalid OpenAPI controllers")]
    InvalidControllers,

    #[error("Invalid OpenAPI secret")]
    InvalidSecret,
}

/// A validated API descriptor.
#[derive(Debug, Clone)]
pub struct Api {
    version: String,
    specification: Value,
    controllers: ControllerMap,
    secret: Option<String>,
    request_validation: bool,
    response_validation: bool,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            specification: Value::Object(serde_json::Map::new()),
            controllers: ControllerMap::new(),
            secret: None,
            request_validation: false,
            response_validation: false,
        }
    }
}

impl Api {
    /// Validate a raw descriptor, applying the setters in fixed order:
    /// version, specification, controllers, secret, validation flags.
    pub fn create(config: ApiConfig) -> Result<Self, ApiError> {
        let mut api = Api::default();

        api.set_version(config.version)?;
        api.set_specification(config.specification)?;
        api.set_controllers(config.controllers)?;
        api.set_secret(config.secret)?;
        api.set_request_validation(config.request_validation);
        api.set_response_validation(config.response_validation);

        Ok(api)
    }

    /// Path-prefix version string; must be non-empty and contain no slash.
    pub fn set_version(&mut self, version: impl Into<String>) -> Result<(), ApiError> {
        let version = version.into();
        if version.trim().is_empty() || version.contains('/') {
            return Err(ApiError::InvalidVersion);
        }
        self.version = version;
        Ok(())
    }

    /// The specification document must be a JSON object.
    pub fn set_specification(&mut self, specification: Value) -> Result<(), ApiError> {
        if !specification.is_object() {
            return Err(ApiError::InvalidSpecification);
        }
        self.specification = specification;
        Ok(())
    }

    /// At least one controller must be mapped.
    pub fn set_controllers(&mut self, controllers: ControllerMap) -> Result<(), ApiError> {
        if controllers.is_empty() {
            return Err(ApiError::InvalidControllers);
        }
        self.controllers = controllers;
        Ok(())
    }

    /// The shared secret, when present, must be non-empty.
    pub fn set_secret(&mut self, secret: Option<String>) -> Result<(), ApiError> {
        if let Some(secret) = &secret {
            if secret.is_empty() {
                return Err(ApiError::InvalidSecret);
            }
        }
        self.secret = secret;
        Ok(())
    }

    pub fn set_request_validation(&mut self, enabled: bool) {
        self.request_validation = enabled;
    }

    pub fn set_response_validation(&mut self, enabled: bool) {
        self.response_validation = enabled;
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn specification(&self) -> &Value {
        &self.specification
    }

    pub fn controllers(&self) -> &ControllerMap {
        &self.controllers
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn request_validation(&self) -> bool {
        self.request_validation
    }

    pub fn response_validation(&self) -> bool {
        self.response_validation
    }

    /// Consume the entity into the arguments of the dispatch backend.
    pub fn into_dispatch_options(self) -> DispatchOptions {
        DispatchOptions {
            specification: self.specification,
            controllers: self.controllers,
            secret: self.secret,
            request_validation: self.request_validation,
            response_validation: self.response_validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::controller::{ControllerResponse, OperationRequest};
    use serde_json::json;

    fn controllers() -> ControllerMap {
        ControllerMap::new().register("getStatus", |_request: OperationRequest| async {
            Ok(ControllerResponse::ok(json!({ "message": "ok" })))
        })
    }

    fn descriptor() -> ApiConfig {
        ApiConfig::new("v1", json!({ "openapi": "3.0.3" }), controllers())
    }

    #[test]
    fn rejects_empty_version() {
        let mut config = descriptor();
        config.version = String::new();
        assert_eq!(Api::create(config).unwrap_err(), ApiError::InvalidVersion);
    }

    #[test]
    fn rejects_non_object_specification() {
        for specification in [json!(null), json!("spec"), json!(42), json!([1, 2])] {
            let mut config = descriptor();
            config.specification = specification;
            assert_eq!(
                Api::create(config).unwrap_err(),
                ApiError::InvalidSpecification
            );
        }
    }

    #[test]
    fn rejects_empty_controllers() {
        let mut config = descriptor();
        config.controllers = ControllerMap::new();
        assert_eq!(
            Api::create(config).unwrap_err(),
            ApiError::InvalidControllers
        );
    }

    #[test]
    fn rejects_empty_secret() {
        let mut config = descriptor();
        config.secret = Some(String::new());
        assert_eq!(Api::create(config).unwrap_err(), ApiError::InvalidSecret);
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            ApiError::InvalidSpecification.to_string(),
            "Invalid OpenAPI specification"
        );
        assert_eq!(
            ApiError::InvalidControllers.to_string(),
            "Invalid OpenAPI controllers"
        );
        assert_eq!(ApiError::InvalidSecret.to_string(), "Invalid OpenAPI secret");
    }

    #[test]
    fn valid_descriptor_round_trips() {
        let api = Api::create(descriptor().with_secret("secret")).expect("valid descriptor");
        assert_eq!(api.version(), "v1");
        assert_eq!(api.secret(), Some("secret"));
        assert!(!api.request_validation());
        assert!(!api.response_validation());
        assert_eq!(api.controllers().len(), 1);
    }
}
