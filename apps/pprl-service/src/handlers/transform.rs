// [apps/pprl-service/src/handlers/transform.rs]
use axum::Json;
use tracing::instrument;

use pprl_model::{EntityTransformRequest, EntityTransformResponse};

use crate::error::ServiceError;

/// `POST /transform` — runs the configured transformer chains over every
/// attribute of every entity in the request.
#[instrument(skip(request), fields(entities = request.entities.len()))]
pub async fn handle_transform(
    Json(request): Json<EntityTransformRequest>,
) -> Result<Json<EntityTransformResponse>, ServiceError> {
    request.validate_structure()?;
    let response = pprl_core::transform(&request)?;
    Ok(Json(response))
}
