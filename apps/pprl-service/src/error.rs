// [apps/pprl-service/src/error.rs]
//! Maps `pprl-model`'s structural errors and `pprl-core`'s engine errors to
//! the `{ "detail": <string> }` envelope and the 400/422/501 status
//! taxonomy. Nothing here ever panics a handler task.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pprl_core::CoreError;
use pprl_model::ModelError;

/// Every error a request handler can return, already carrying enough
/// information to pick the right HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Schema/structural rejection (422) — `pprl-model`'s `validate()`.
    #[error(transparent)]
    Structural(#[from] ModelError),
    /// Validation, Capability, Value, or Internal failure from an engine.
    #[error(transparent)]
    Engine(#[from] CoreError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ServiceError::Structural(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ServiceError::Engine(e @ CoreError::Unimplemented { .. }) => {
                (StatusCode::NOT_IMPLEMENTED, e.to_string())
            }
            ServiceError::Engine(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn structural_errors_map_to_422() {
        let response = ServiceError::Structural(ModelError::NoTransformers).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(
            body["detail"],
            "attribute and global transformers are empty: must contain at least one"
        );
    }

    #[tokio::test]
    async fn unimplemented_engine_errors_map_to_501() {
        let response = ServiceError::Engine(CoreError::Unimplemented {
            kind: "phonetic algorithm",
            name: "metaphone".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn other_engine_errors_map_to_400() {
        let response = ServiceError::Engine(CoreError::PairwiseLengthMismatch {
            domain_len: 2,
            range_len: 1,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
