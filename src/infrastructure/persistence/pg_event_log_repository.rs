//! PostgreSQL implementation of the outcome log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewInsertEntry, NewTranslateEntry, NewVisitEntry};
use crate::domain::repositories::EventLogRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for the three append-only logs.
///
/// The 24-hour cut and the strict/successful filter for rate limiting are
/// pushed into SQL; callers get back bare timestamps.
pub struct PgEventLogRepository {
    pool: Arc<PgPool>,
}

impl PgEventLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLogRepository for PgEventLogRepository {
    async fn recent_insert_attempts(
        &self,
        client_ip: &str,
        strict: bool,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let query = if strict {
            r#"
            SELECT created_at FROM insert_log
            WHERE ip_address = $1 AND created_at > now() - INTERVAL '24 hours'
            "#
        } else {
            r#"
            SELECT created_at FROM insert_log
            WHERE ip_address = $1 AND created_at > now() - INTERVAL '24 hours'
              AND response IN (200, 201)
            "#
        };

        sqlx::query_scalar(query)
            .bind(client_ip)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn log_visit(&self, entry: NewVisitEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO visit_log (url_code, response, ip_address, user_agent, referral)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&entry.code)
        .bind(entry.response as i16)
        .bind(&entry.client_ip)
        .bind(&entry.user_agent)
        .bind(&entry.referer)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn log_insert(&self, entry: NewInsertEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO insert_log (url_code, response, ip_address) VALUES ($1, $2, $3)",
        )
        .bind(&entry.code)
        .bind(entry.response as i16)
        .bind(&entry.client_ip)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn log_translate(&self, entry: NewTranslateEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO translate_log (url_code, response, ip_address) VALUES ($1, $2, $3)",
        )
        .bind(&entry.code)
        .bind(entry.response as i16)
        .bind(&entry.client_ip)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn total_visits(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visit_log WHERE response < 400")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn visits_for_code(&self, code: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visit_log WHERE response < 400 AND url_code = $1",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(count)
    }
}
