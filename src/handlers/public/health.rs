use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

/// GET /health/ - liveness check
///
/// Always answers `{"status": "ok"}` while the process is serving requests.
/// It does not touch the database.
pub async fn health_get() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
