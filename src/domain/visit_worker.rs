//! Background worker that records queued visits.
//!
//! The worker owns its own lifetime: it keeps running after the HTTP request that
//! produced an event has finished, and each visit gets an independent deadline.
//! Failures are logged and counted, never reported back to a client.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::application::services::VisitService;
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;

/// Tuning knobs for [`run_visit_worker`].
#[derive(Debug, Clone, Copy)]
pub struct VisitWorkerSettings {
    /// Maximum number of visits processed at the same time.
    pub concurrency: usize,
    /// Deadline for deriving and persisting a single visit, retries included.
    pub timeout: Duration,
}

impl Default for VisitWorkerSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Consumes visit events until every sender has been dropped.
///
/// Events are processed concurrently up to `settings.concurrency`. Once the channel
/// closes, the worker drains whatever is still queued and waits for in-flight
/// visits before returning.
pub async fn run_visit_worker<V>(
    mut rx: mpsc::Receiver<VisitEvent>,
    service: Arc<VisitService<V>>,
    settings: VisitWorkerSettings,
) where
    V: VisitRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(settings.concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let service = service.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            process_event(&service, event, settings.timeout).await;
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}

    info!("Visit worker stopped");
}

async fn process_event<V>(service: &VisitService<V>, event: VisitEvent, deadline: Duration)
where
    V: VisitRepository + ?Sized,
{
    let code = event.code.clone();

    match tokio::time::timeout(deadline, service.record(event)).await {
        Ok(Ok(visit)) => {
            metrics::counter!("visits_recorded_total").increment(1);
            debug!(
                code = %visit.code,
                country = %visit.country,
                browser = %visit.browser,
                device = %visit.device,
                "Visit recorded"
            );
        }
        Ok(Err(e)) => {
            metrics::counter!("visits_failed_total").increment(1);
            warn!(code = %code, error = %e, "Failed to record visit");
        }
        Err(_) => {
            metrics::counter!("visits_failed_total").increment(1);
            warn!(
                code = %code,
                timeout_ms = deadline.as_millis() as u64,
                "Visit recording timed out"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::geo::{GeoLocator, NullGeoLocator};
    use crate::infrastructure::persistence::InMemoryVisitRepository;
    use async_trait::async_trait;

    const SLOW_IP: &str = "203.0.113.99";

    /// Hangs on one address, answers immediately for the rest.
    struct StallingGeoLocator;

    #[async_trait]
    impl GeoLocator for StallingGeoLocator {
        async fn lookup_country(&self, ip: &str) -> Option<String> {
            if ip == SLOW_IP {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Some("Germany".to_string())
        }

        fn name(&self) -> &'static str {
            "stalling"
        }
    }

    fn service() -> (Arc<InMemoryVisitRepository>, Arc<VisitService<InMemoryVisitRepository>>) {
        let repo = Arc::new(InMemoryVisitRepository::new());
        let service = Arc::new(VisitService::new(repo.clone(), Arc::new(NullGeoLocator)));
        (repo, service)
    }

    #[tokio::test]
    async fn test_worker_records_queued_events_and_stops_when_closed() {
        let (repo, service) = service();
        let (tx, rx) = mpsc::channel(16);
        let settings = VisitWorkerSettings {
            concurrency: 1,
            ..VisitWorkerSettings::default()
        };
        let worker = tokio::spawn(run_visit_worker(rx, service, settings));

        tx.send(VisitEvent::new(
            "abc123".to_string(),
            "127.0.0.1".to_string(),
            Some("Mozilla/5.0 (iPhone) Mobile Safari/604.1"),
        ))
        .await
        .unwrap();
        tx.send(VisitEvent::new(
            "abc123".to_string(),
            "::1".to_string(),
            Some("Mozilla/5.0 Firefox/121.0"),
        ))
        .await
        .unwrap();
        drop(tx);

        worker.await.unwrap();

        let visits = repo.get_analytics("abc123").await.unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].browser, "Safari");
        assert_eq!(visits[0].device, "Mobile");
        assert_eq!(visits[0].country, "Localhost");
        assert_eq!(visits[1].browser, "Firefox");
        assert_eq!(visits[1].device, "Desktop");
    }

    #[tokio::test]
    async fn test_worker_with_single_permit_processes_everything() {
        let (repo, service) = service();
        let (tx, rx) = mpsc::channel(128);
        let settings = VisitWorkerSettings {
            concurrency: 1,
            timeout: Duration::from_secs(5),
        };
        let worker = tokio::spawn(run_visit_worker(rx, service, settings));

        for _ in 0..50 {
            tx.send(VisitEvent::new("many".to_string(), "203.0.113.9".to_string(), None))
                .await
                .unwrap();
        }
        drop(tx);

        worker.await.unwrap();

        let visits = repo.get_analytics("many").await.unwrap();
        assert_eq!(visits.len(), 50);
        assert!(visits.iter().all(|v| v.country == "Unknown"));
        assert!(visits.iter().all(|v| v.browser == "Unknown"));
    }

    #[tokio::test]
    async fn test_slow_visit_is_abandoned_at_deadline() {
        let repo = Arc::new(InMemoryVisitRepository::new());
        let service = Arc::new(VisitService::new(repo.clone(), Arc::new(StallingGeoLocator)));
        let (tx, rx) = mpsc::channel(16);
        let settings = VisitWorkerSettings {
            concurrency: 2,
            timeout: Duration::from_millis(100),
        };
        let worker = tokio::spawn(run_visit_worker(rx, service, settings));

        tx.send(VisitEvent::new("slow".to_string(), SLOW_IP.to_string(), None))
            .await
            .unwrap();
        for _ in 0..3 {
            tx.send(VisitEvent::new("fast".to_string(), "203.0.113.1".to_string(), None))
                .await
                .unwrap();
        }
        drop(tx);

        tokio::time::timeout(Duration::from_secs(5), worker)
            .await
            .expect("worker should drain well before the stalled lookup finishes")
            .unwrap();

        assert!(repo.get_analytics("slow").await.unwrap().is_empty());

        let fast = repo.get_analytics("fast").await.unwrap();
        assert_eq!(fast.len(), 3);
        assert!(fast.iter().all(|v| v.country == "Germany"));
    }
}
