//! HTTP server initialization and runtime setup.
//!
//! Handles storage and geolocation setup, worker spawning, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{LinkService, VisitService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_worker::{VisitWorkerSettings, run_visit_worker};
use crate::infrastructure::geo::{GeoLocator, HttpGeoLocator, NullGeoLocator};
use crate::infrastructure::metrics::install_recorder;
use crate::infrastructure::persistence::{
    InMemoryLinkRepository, InMemoryVisitRepository, PgLinkRepository, PgVisitRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Link and visit repositories for the configured backend.
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub visits: Arc<dyn VisitRepository>,
}

/// Creates a PostgreSQL pool from the configured settings and applies migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(pool)
}

/// Builds the repositories for the configured storage backend.
pub async fn build_repositories(config: &Config) -> Result<Repositories> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;
            let pool = Arc::new(connect_database(config, database_url).await?);

            Ok(Repositories {
                links: Arc::new(PgLinkRepository::new(pool.clone())),
                visits: Arc::new(PgVisitRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");

            Ok(Repositories {
                links: Arc::new(InMemoryLinkRepository::new()),
                visits: Arc::new(InMemoryVisitRepository::new()),
            })
        }
    }
}

/// Selects the geolocator, falling back to disabled lookups if the HTTP client
/// cannot be built.
pub fn build_geo_locator(config: &Config) -> Arc<dyn GeoLocator> {
    let Some(ref url) = config.geoip_api_url else {
        tracing::info!("Geolocation disabled");
        return Arc::new(NullGeoLocator);
    };

    match HttpGeoLocator::new(url.clone(), config.geoip_timeout()) {
        Ok(locator) => {
            tracing::info!("Geolocation enabled ({url})");
            Arc::new(locator)
        }
        Err(e) => {
            tracing::warn!("Failed to build geolocation client: {}. Lookups disabled.", e);
            Arc::new(NullGeoLocator)
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Prometheus metrics recorder
/// - Storage (PostgreSQL pool + migrations, or in-memory)
/// - Geolocation client (or disabled lookups)
/// - Background visit worker
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting connections, then the visit
/// queue is closed and the worker drains it before this function returns.
///
/// # Errors
///
/// Returns an error if:
/// - The metrics recorder cannot be installed
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let metrics = install_recorder().context("Failed to install metrics recorder")?;

    let repositories = build_repositories(&config).await?;
    let geo_locator = build_geo_locator(&config);

    let link_service = Arc::new(LinkService::new(repositories.links));
    let visit_service = Arc::new(VisitService::new(repositories.visits, geo_locator));

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        visit_service.clone(),
        VisitWorkerSettings {
            concurrency: config.visit_worker_concurrency,
            timeout: config.visit_timeout(),
        },
    ));
    tracing::info!("Visit worker started");

    let state = AppState {
        link_service,
        visit_service,
        visit_sender: visit_tx,
        base_url: config.base_url.clone(),
        metrics,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it the last sender) is gone once serve returns.
    tracing::info!("Server stopped, draining visit queue");
    if let Err(e) = worker.await {
        tracing::error!("Visit worker panicked: {}", e);
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
