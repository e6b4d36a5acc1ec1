//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link; unknown codes return 404, expired ones 410
/// 2. Queue a visit event for the background worker
/// 3. Return 302 Found with `Location: long_url`
///
/// # Visit Tracking
///
/// Events go into a bounded channel with `try_send`. If the queue is full the
/// visit is dropped with a warning; the redirect is never delayed.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve_redirect(&code).await?;

    let event = VisitEvent::new(
        link.code,
        client_ip(&headers, addr),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    match state.visit_sender.try_send(event) {
        Ok(()) => metrics::counter!("visits_enqueued_total").increment(1),
        Err(TrySendError::Full(event)) => {
            metrics::counter!("visits_dropped_total").increment(1);
            warn!(code = %event.code, "Visit queue full, dropping visit");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("visits_dropped_total").increment(1);
            warn!(code = %event.code, "Visit queue closed, dropping visit");
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
