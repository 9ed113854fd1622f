use axum::{extract::State, http::StatusCode, Json};

use crate::api::{
    state::AppState,
    types::{HealthResponse, ReadinessResponse},
};

/// GET /health -- liveness probe, independent of model state
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

/// GET /readyz -- per-model load status, 503 unless all models loaded
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let bundle = state.predictor.bundle();
    let ready = bundle.is_ready();

    let resp = ReadinessResponse {
        status: if ready { "ready" } else { "degraded" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        feature_width: state.predictor.feature_width(),
        models: bundle.statuses(),
    };

    if ready {
        (StatusCode::OK, Json(resp))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(resp))
    }
}
