// [apps/pprl-service/src/handlers/health.rs]
use axum::Json;
use pprl_model::HealthResponse;

/// `GET /healthz` — trivial liveness probe, always `{"status":"ok"}` if the
/// process can answer requests at all.
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
