//! API route configuration.

use crate::api::handlers::{
    analytics_handler, delete_link_handler, health_handler, list_links_handler,
    metrics_handler, redirect_handler, shorten_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// All service routes.
///
/// # Endpoints
///
/// - `GET    /all`               - List non-expired links
/// - `POST   /shorten`           - Create a short link
/// - `PUT    /update/{code}`     - Replace destination and visibility
/// - `DELETE /delete/{code}`     - Delete a link
/// - `GET    /analytics/{code}`  - Visits for a code, oldest first
/// - `GET    /health`            - Storage and visit queue checks
/// - `GET    /metrics`           - Prometheus counters
/// - `GET    /{code}`            - Redirect (302) and record a visit
///
/// Static segments take precedence over `/{code}`, which is why those words are
/// reserved as custom codes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_links_handler))
        .route("/shorten", post(shorten_handler))
        .route("/update/{code}", put(update_link_handler))
        .route("/delete/{code}", delete(delete_link_handler))
        .route("/analytics/{code}", get(analytics_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{code}", get(redirect_handler))
}
