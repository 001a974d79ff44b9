//! Health handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: bool,
}

/// Liveness plus a database round-trip.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let database = state.db.health_check().await;

    let status = HealthStatus {
        status: if database { "ok" } else { "degraded" },
        database,
    };

    Json(ApiResponse::new("Health checked", status))
}
