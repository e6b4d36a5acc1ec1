#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tower::Layer;

use linkpulse::application::services::{LinkService, VisitService};
use linkpulse::domain::entities::{Link, NewVisit, Visibility};
use linkpulse::domain::repositories::{LinkRepository, VisitRepository};
use linkpulse::domain::visit_event::VisitEvent;
use linkpulse::infrastructure::geo::NullGeoLocator;
use linkpulse::infrastructure::persistence::{InMemoryLinkRepository, InMemoryVisitRepository};
use linkpulse::state::AppState;

pub const BASE_URL: &str = "http://s.test";

/// In-memory application state plus direct handles on its stores.
pub struct TestContext {
    pub state: AppState,
    pub visit_rx: mpsc::Receiver<VisitEvent>,
    pub links: Arc<InMemoryLinkRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with_capacity(100)
}

pub fn create_test_state_with_capacity(capacity: usize) -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::new());
    let visits = Arc::new(InMemoryVisitRepository::new());
    let (tx, rx) = mpsc::channel(capacity);

    let link_repo: Arc<dyn LinkRepository> = links.clone();
    let visit_repo: Arc<dyn VisitRepository> = visits.clone();

    let state = AppState {
        link_service: Arc::new(LinkService::new(link_repo)),
        visit_service: Arc::new(VisitService::new(visit_repo, Arc::new(NullGeoLocator))),
        visit_sender: tx,
        base_url: BASE_URL.to_string(),
        metrics: metrics_handle(),
    };

    TestContext {
        state,
        visit_rx: rx,
        links,
        visits,
    }
}

/// The recorder is global, so every test in a binary shares one handle.
pub fn metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| linkpulse::infrastructure::metrics::install_recorder().unwrap())
        .clone()
}

/// The full route table with a fixed peer address.
pub fn app(state: AppState) -> Router {
    linkpulse::api::routes::routes()
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

pub async fn insert_link(
    repo: &InMemoryLinkRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) {
    let link = Link::new(
        code.to_string(),
        url.to_string(),
        Utc::now(),
        Visibility::Public,
        expires_at,
    );
    repo.create(&link).await.unwrap();
}

pub async fn insert_visit(repo: &InMemoryVisitRepository, code: &str, at: DateTime<Utc>) {
    repo.log_visit(NewVisit {
        code: code.to_string(),
        timestamp: at,
        ip: "203.0.113.5".to_string(),
        country: "Germany".to_string(),
        browser: "Firefox".to_string(),
        device: "Desktop".to_string(),
    })
    .await
    .unwrap();
}

/// Injects `ConnectInfo` the way `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
