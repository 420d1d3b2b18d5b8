//! In-memory link repository.
//!
//! Backs integration tests and local experiments that should not require a
//! running PostgreSQL. Mirrors the uniqueness semantics of the real schema:
//! one row per code and one row per long URL.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;

/// Link storage in a `Mutex<Vec<_>>`. Lock scope is a handful of scans, so
/// contention is irrelevant at test scale.
pub struct MemLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl MemLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl LinkRepository for MemLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.code == new_link.code) {
            return Ok(InsertOutcome::DuplicateCode);
        }
        if links.iter().any(|l| l.long_url == new_link.long_url) {
            return Ok(InsertOutcome::DuplicateUrl);
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            new_link.code,
            new_link.long_url,
            Utc::now(),
        );
        links.push(link.clone());

        Ok(InsertOutcome::Created(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.code == code).cloned())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.long_url == long_url).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}
