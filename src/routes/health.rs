//! Health check endpoints for liveness and readiness.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness check detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub backend: String,
    pub database: String,
}

/// Liveness check — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness check — checks document store connectivity.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let db_status = match state.documents.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Document store health check failed");
            format!("error: {e}")
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        backend: state.documents.backend_name().to_string(),
        database: db_status,
    })
}
