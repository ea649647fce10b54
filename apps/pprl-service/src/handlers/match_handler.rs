// [apps/pprl-service/src/handlers/match_handler.rs]
use axum::Json;
use tracing::instrument;

use pprl_model::{VectorMatchRequest, VectorMatchResponse};

use crate::error::ServiceError;

/// `POST /match` — scores every domain/range pair (crosswise or pairwise)
/// and returns those meeting the configured similarity threshold.
#[instrument(skip(request), fields(domain = request.domain.len(), range = request.range.len()))]
pub async fn handle_match(
    Json(request): Json<VectorMatchRequest>,
) -> Result<Json<VectorMatchResponse>, ServiceError> {
    request.validate_structure()?;
    let response = pprl_core::run_match(&request)?;
    Ok(Json(response))
}
