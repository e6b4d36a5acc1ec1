//! Shared application state injected into every handler.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, VisitService};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;

/// Services and channels shared across requests.
///
/// Repositories are held as trait objects so the same router serves the
/// PostgreSQL and in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub visit_service: Arc<VisitService<dyn VisitRepository>>,
    pub visit_sender: mpsc::Sender<VisitEvent>,
    /// Public prefix used to build `short_url` values.
    pub base_url: String,
    /// Renders the process-wide counters for `GET /metrics`.
    pub metrics: PrometheusHandle,
}
