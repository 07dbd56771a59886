use std::sync::Arc;

use axum::{
    extract::State,
    http::Uri,
    response::{Html, IntoResponse, Json},
};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn openapi_json(State(doc): State<Arc<utoipa::openapi::OpenApi>>) -> impl IntoResponse {
    Json(doc.as_ref().clone())
}

pub async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Dayplan API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

/// Unmatched routes render as Problem Details instead of an empty 404.
pub async fn route_not_found(uri: Uri) -> modkit::ProblemResponse {
    let mut resp = modkit::not_found(format!("No route for {}", uri.path()));
    resp.0 = resp.0.with_instance(uri.path()).with_code("ROUTE_NOT_FOUND");
    resp
}
