//! Per-API sub-router.
//!
//! # Responsibilities
//! - Validate the descriptor before anything is mounted
//! - Serve the interactive documentation UI and the raw specification
//! - Hand every other request to the dispatch backend

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::entity::Api;
use crate::config::schema::ApiConfig;
use crate::dispatch::OperationBackend;
use crate::http::server::BuildError;

/// Documentation UI shell. The bundle comes from the swagger-ui CDN and is
/// pointed at this API's raw-specification endpoint.
const SWAGGER_UI_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{title}}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: '{{spec_url}}',
        dom_id: '#swagger-ui',
      });
    };
  </script>
</body>
</html>
"#;

/// Build the sub-router for one API descriptor.
///
/// `GET /swagger` serves the documentation UI, `GET /api-docs` the raw
/// specification; everything else goes to the dispatch backend. Descriptor
/// errors propagate to the build entry point unhandled.
pub fn api_router(config: ApiConfig) -> Result<Router, BuildError> {
    let api = Api::create(config)?;

    let title = api
        .specification()
        .pointer("/info/title")
        .and_then(Value::as_str)
        .unwrap_or("API documentation")
        .to_string();
    let spec_url = format!("/{}/api-docs", api.version());
    let page = SWAGGER_UI_TEMPLATE
        .replace("{{title}}", &title)
        .replace("{{spec_url}}", &spec_url);

    let specification = Arc::new(api.specification().clone());

    let backend = OperationBackend::new(api.into_dispatch_options())?;

    let router = Router::new()
        .route(
            "/swagger",
            get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        .route(
            "/api-docs",
            get(move || {
                let specification = specification.clone();
                async move { Json((*specification).clone()) }
            }),
        )
        .fallback_service(backend.into_router());

    Ok(router)
}
