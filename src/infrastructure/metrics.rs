//! Prometheus export of the `metrics` counters.
//!
//! The recorder is process-global: install it once at startup and hand the returned
//! [`PrometheusHandle`] to whatever renders `GET /metrics`.

use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Installs the global Prometheus recorder and registers counter descriptions.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!("links_created_total", "Short links created");
    describe_counter!("visits_enqueued_total", "Visit events queued by redirects");
    describe_counter!(
        "visits_dropped_total",
        "Visit events dropped because the queue was full or closed"
    );
    describe_counter!("visits_recorded_total", "Visits stored by the worker");
    describe_counter!(
        "visits_failed_total",
        "Visits abandoned after a storage error or the per-visit deadline"
    );
}
