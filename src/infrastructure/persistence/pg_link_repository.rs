//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, Visibility};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct LinkRow {
    code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    visibility: String,
    expires_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.code,
            row.long_url,
            row.created_at,
            Visibility::normalize(Some(&row.visibility)),
            row.expires_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links.code` primary key is the uniqueness guarantee; a duplicate insert
/// surfaces as [`AppError::Conflict`] through the `sqlx::Error` conversion.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, link: &Link) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (code, long_url, created_at, visibility, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&link.code)
        .bind(&link.long_url)
        .bind(link.created_at)
        .bind(link.visibility.as_str())
        .bind(link.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, long_url, created_at, visibility, expires_at
            FROM links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, long_url, created_at, visibility, expires_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn update(&self, code: &str, link: &Link) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET long_url = $2, visibility = $3, created_at = $4, expires_at = $5
            WHERE code = $1
            RETURNING code, long_url, created_at, visibility, expires_at
            "#,
        )
        .bind(code)
        .bind(&link.long_url)
        .bind(link.visibility.as_str())
        .bind(link.created_at)
        .bind(link.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
