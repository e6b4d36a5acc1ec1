//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct VisitRow {
    id: i64,
    code: String,
    visited_at: DateTime<Utc>,
    ip: String,
    country: String,
    browser: String,
    device: String,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Visit {
            id: row.id,
            code: row.code,
            timestamp: row.visited_at,
            ip: row.ip,
            country: row.country,
            browser: row.browser,
            device: row.device,
        }
    }
}

/// PostgreSQL repository for visit analytics.
///
/// `visits.code` carries no foreign key: visits outlive deleted links.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn log_visit(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (code, visited_at, ip, country, browser, device)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, visited_at, ip, country, browser, device
            "#,
        )
        .bind(&visit.code)
        .bind(visit.timestamp)
        .bind(&visit.ip)
        .bind(&visit.country)
        .bind(&visit.browser)
        .bind(&visit.device)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit::from(row))
    }

    async fn get_analytics(&self, code: &str) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, code, visited_at, ip, country, browser, device
            FROM visits
            WHERE code = $1
            ORDER BY visited_at ASC, id ASC
            "#,
        )
        .bind(code)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }
}
