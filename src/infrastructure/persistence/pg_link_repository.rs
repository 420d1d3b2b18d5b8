//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::{AppError, map_sqlx_error};

/// Unique constraints the insert can trip over, by constraint name.
enum UniqueViolation {
    Code,
    Url,
}

fn unique_violation(e: &sqlx::Error) -> Option<UniqueViolation> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some("links_code_key") => Some(UniqueViolation::Code),
        Some("links_long_url_key") => Some(UniqueViolation::Url),
        _ => None,
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.code, row.long_url, row.created_at)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links` table carries UNIQUE constraints on both `code` and
/// `long_url`; [`insert`](LinkRepository::insert) translates the resulting
/// violations into [`InsertOutcome`] variants instead of opaque errors, which
/// is what makes the caller's retry/adopt logic race-safe.
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
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, long_url, ip_address)
            VALUES ($1, $2, $3)
            RETURNING id, code, long_url, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .bind(&new_link.client_ip)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Created(row.into())),
            Err(e) => match unique_violation(&e) {
                Some(UniqueViolation::Code) => Ok(InsertOutcome::DuplicateCode),
                Some(UniqueViolation::Url) => Ok(InsertOutcome::DuplicateUrl),
                None => Err(map_sqlx_error(e)),
            },
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, code, long_url, created_at FROM links WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, code, long_url, created_at FROM links WHERE long_url = $1",
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }
}
