use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Resume Analysis API is running!" }))
}

/// GET /health
/// Returns service version plus the loaded catalog and classifier backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.analyzer.catalog();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer-api",
        "catalog_version": catalog.version(),
        "roles": catalog.len(),
        "backend": state.analyzer.backend().to_string(),
    }))
}
