//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of attempting to persist a new link.
///
/// The storage layer enforces uniqueness of both the code and the long URL,
/// and callers need to tell the two violations apart: a taken code means
/// "generate another and retry", a taken URL means "someone else shortened
/// this URL concurrently, return their code".
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Created(Link),
    DuplicateCode,
    DuplicateUrl,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemLinkRepository`] - In-memory, for tests
/// - Mock implementations are auto-generated via `mockall` for unit tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link under a uniqueness guarantee.
    ///
    /// The insert itself is the authoritative collision check: a concurrent
    /// request that won the race surfaces here as [`InsertOutcome::DuplicateCode`]
    /// or [`InsertOutcome::DuplicateUrl`], never as two stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors other than the two
    /// expected uniqueness violations.
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its normalized long URL.
    ///
    /// Used to check if a URL has already been shortened.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
