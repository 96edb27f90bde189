use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

// GET /api/health. Responds 200 when both endpoints answer, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.client.health_check().await;
    let healthy = health.is_healthy();

    let body = Json(json!({
        "status": if healthy { "ok" } else { "degraded" },
        "timestamp": Utc::now().to_rfc3339(),
        "aztec": health,
    }));

    if healthy {
        (StatusCode::OK, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, body)
    }
}
