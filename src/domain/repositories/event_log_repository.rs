//! Repository trait for the append-only outcome logs.

use crate::domain::entities::{NewInsertEntry, NewTranslateEntry, NewVisitEntry};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for outcome logging and rate-limit history.
///
/// Writes are fire-and-forget from the caller's perspective (they go through
/// the background worker, see [`crate::domain::log_worker`]); the only read
/// paths are the rate limiter's history query and the stats endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Timestamps of the client's shortening attempts within the trailing
    /// 24 hours, newest or oldest first - order is not significant.
    ///
    /// With `strict` set, every logged attempt is returned; otherwise only
    /// attempts whose recorded response was a success (200 or 201). The
    /// 24-hour cut is applied here so the rate limiter never needs a second,
    /// narrower query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent_insert_attempts(
        &self,
        client_ip: &str,
        strict: bool,
    ) -> Result<Vec<DateTime<Utc>>, AppError>;

    /// Records a redirect attempt.
    async fn log_visit(&self, entry: NewVisitEntry) -> Result<(), AppError>;

    /// Records a shortening attempt.
    async fn log_insert(&self, entry: NewInsertEntry) -> Result<(), AppError>;

    /// Records a code translation.
    async fn log_translate(&self, entry: NewTranslateEntry) -> Result<(), AppError>;

    /// Number of successful redirects ever served.
    async fn total_visits(&self) -> Result<i64, AppError>;

    /// Number of successful redirects for one code.
    async fn visits_for_code(&self, code: &str) -> Result<i64, AppError>;
}
