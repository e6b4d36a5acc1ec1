//! Handlers for link management endpoints (list, create, update, delete).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::api::extractors::AppJson;
use crate::error::AppError;
use crate::state::AppState;

/// Body returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Lists every link that has not expired, newest first.
///
/// # Endpoint
///
/// `GET /all`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.get_all().await?;

    Ok(Json(
        links
            .into_iter()
            .map(|l| LinkResponse::from_link(l, &state.base_url))
            .collect(),
    ))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "https://example.com/some/long/path",
///   "custom_code": "my-link",            // optional, "" = generate
///   "visibility": "private",             // optional, default public
///   "expires_at": "2030-01-01T00:00:00Z" // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for a malformed body, an empty/invalid URL or a malformed
///   custom code
/// - 409 Conflict if the custom code is taken
/// - 503 Service Unavailable if no free generated code was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ShortenRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.shorten(payload.into()).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Replaces a link's destination and visibility.
///
/// # Endpoint
///
/// `PUT /update/{code}`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "https://new-destination.com",
///   "visibility": "public"
/// }
/// ```
///
/// `created_at` is refreshed; `expires_at` cannot be changed here.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 400 Bad Request if the new URL is invalid.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.update(&code, payload.into()).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Permanently deletes a short link. Recorded visits are kept.
///
/// # Endpoint
///
/// `DELETE /delete/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete(&code).await?;

    Ok(Json(MessageResponse {
        message: "deleted successfully".to_string(),
    }))
}
