//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{NaiveDateTime, SubsecRound};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL records.
///
/// Ids come from the `urls.id` BIGSERIAL. `created_at` is stamped from the
/// injected clock, the same one liveness checks and purges read, so the
/// database session's time zone never enters the comparison. Uses SQLx bound
/// parameters for SQL injection protection.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
    clock: Arc<dyn Clock>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[derive(Debug, FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    created_at: NaiveDateTime,
    expires_at: Option<NaiveDateTime>,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(r.id, r.original_url, r.created_at, r.expires_at)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, created_at, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, created_at, expires_at
            "#,
        )
        .bind(&new_url.original_url)
        .bind(self.clock.now().trunc_subsecs(0))
        .bind(new_url.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, created_at, expires_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_url_and_expiry(
        &self,
        original_url: &str,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, created_at, expires_at
            FROM urls
            WHERE original_url = $1
              AND expires_at IS NOT DISTINCT FROM $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .bind(expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_expired_before(&self, cutoff: NaiveDateTime) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE expires_at < $1")
            .bind(cutoff)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
