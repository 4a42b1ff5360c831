//! Liveness handlers.

use axum::Json;
use serde_json::{Value, json};

/// `GET /` and `GET /{*path}`
pub async fn status() -> Json<Value> {
    Json(json!({ "ok": "ok" }))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
