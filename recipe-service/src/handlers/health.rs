use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::AppState;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running")),
    tag = "Observability"
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "recipe-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the ingredient store must answer
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 503, description = "Store unavailable")
    ),
    tag = "Observability"
)]
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state
        .ingredients
        .repository()
        .health_check()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Readiness check failed");
            AppError::ServiceUnavailable
        })?;

    Ok((StatusCode::OK, Json(json!({ "status": "ready" }))))
}
