// [apps/pprl-service/src/routes.rs]
//! Route topology: three stateless POST adapters plus a liveness probe,
//! wrapped in a CORS/body-limit/request-tracing shield.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::handlers::{health, mask, match_handler, transform};

/// Builds the full router for `config`. No shared application state is
/// threaded through: every handler is a pure function of its request body.
pub fn build_router(config: &ServiceConfig) -> Router {
    Router::new()
        .route("/mask", post(mask::handle_mask))
        .route("/transform", post(transform::handle_transform))
        .route("/match", post(match_handler::handle_match))
        .route("/healthz", get(health::handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_reports_ok() {
        let app = build_router(&ServiceConfig::from_env());
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
