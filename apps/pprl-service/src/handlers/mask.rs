// [apps/pprl-service/src/handlers/mask.rs]
use axum::Json;
use tracing::instrument;

use pprl_model::{EntityMaskRequest, EntityMaskResponse};

use crate::error::ServiceError;

/// `POST /mask` — runs the CLK/RBF/CLKRBF mask engine over the request's
/// entities and returns one bit vector per entity, same order.
#[instrument(skip(request), fields(entities = request.entities.len()))]
pub async fn handle_mask(
    Json(request): Json<EntityMaskRequest>,
) -> Result<Json<EntityMaskResponse>, ServiceError> {
    request.validate_structure()?;
    pprl_core::validate_mask_request(&request)?;
    let response = pprl_core::mask(&request)?;
    Ok(Json(response))
}
