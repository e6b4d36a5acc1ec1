//! Handler for Prometheus metrics endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

/// Exports counters in Prometheus text format.
///
/// # Endpoint
///
/// `GET /metrics`
///
/// A counter appears once it has been incremented at least once.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render(),
    )
}
