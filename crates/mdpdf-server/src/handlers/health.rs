//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /health.
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    /// Always `"ok"` while the server accepts requests.
    status: &'static str,
    /// Human-readable status line.
    message: &'static str,
    /// Server version.
    version: String,
}

/// Handle GET /health.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "API está rodando!",
        version: state.version.clone(),
    })
}
