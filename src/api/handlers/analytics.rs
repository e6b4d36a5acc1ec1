//! Handler for visit analytics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::visit::VisitResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every recorded visit for a code, oldest first.
///
/// # Endpoint
///
/// `GET /analytics/{code}`
///
/// Unknown codes, and codes of deleted links without visits, return `[]`.
pub async fn analytics_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitResponse>>, AppError> {
    let visits = state.visit_service.get_analytics(&code).await?;

    Ok(Json(visits.into_iter().map(VisitResponse::from).collect()))
}
