//! Visit recording and analytics service.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::infrastructure::geo::GeoLocator;
use crate::utils::user_agent::{classify_browser, classify_device};

/// Addresses that never leave the host and skip geolocation.
const LOCAL_ADDRESSES: &[&str] = &["", "::1", "127.0.0.1", "localhost"];

pub const LOCALHOST_COUNTRY: &str = "Localhost";
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Retries after the first failed insert.
const STORAGE_RETRIES: usize = 3;

/// Service turning redirect events into stored visits and reading them back.
pub struct VisitService<V: VisitRepository + ?Sized> {
    repository: Arc<V>,
    geo_locator: Arc<dyn GeoLocator>,
}

impl<V: VisitRepository + ?Sized> VisitService<V> {
    pub fn new(repository: Arc<V>, geo_locator: Arc<dyn GeoLocator>) -> Self {
        Self {
            repository,
            geo_locator,
        }
    }

    /// Derives country, browser and device for an event and stores the visit.
    ///
    /// # Errors
    ///
    /// Returns the last storage error once retries are exhausted.
    pub async fn record(&self, event: VisitEvent) -> Result<Visit, AppError> {
        let country = self.resolve_country(&event.ip).await;

        let visit = NewVisit {
            browser: classify_browser(&event.user_agent).to_string(),
            device: classify_device(&event.user_agent).to_string(),
            code: event.code,
            timestamp: event.occurred_at,
            ip: event.ip,
            country,
        };

        self.log_visit(visit).await
    }

    /// Persists a derived visit, retrying storage failures with jittered backoff.
    pub async fn log_visit(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(STORAGE_RETRIES);

        RetryIf::spawn(
            strategy,
            || {
                let visit = visit.clone();
                async move { self.repository.log_visit(visit).await }
            },
            |e: &AppError| {
                let retry = matches!(e, AppError::Storage { .. });
                if retry {
                    warn!(error = %e, "Visit insert failed, retrying");
                }
                retry
            },
        )
        .await
    }

    /// Resolves the country for a client address.
    ///
    /// Local addresses map to `Localhost` without a lookup; a failed or empty
    /// lookup maps to `Unknown`.
    pub async fn resolve_country(&self, ip: &str) -> String {
        if LOCAL_ADDRESSES.contains(&ip) {
            return LOCALHOST_COUNTRY.to_string();
        }

        match self.geo_locator.lookup_country(ip).await {
            Some(country) if !country.trim().is_empty() => country,
            _ => {
                debug!(ip, locator = self.geo_locator.name(), "Country unresolved");
                UNKNOWN_COUNTRY.to_string()
            }
        }
    }

    /// Returns every visit recorded for `code`, oldest first.
    ///
    /// Unknown codes yield an empty list.
    pub async fn get_analytics(&self, code: &str) -> Result<Vec<Visit>, AppError> {
        self.repository.get_analytics(code).await
    }
}
