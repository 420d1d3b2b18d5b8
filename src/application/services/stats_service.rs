//! Service and per-link statistics.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repositories::{EventLogRepository, LinkRepository};
use crate::error::AppError;

/// Service-wide counters.
#[derive(Debug, Clone, Copy)]
pub struct ServiceStats {
    pub urls: i64,
    pub visits: i64,
}

/// Counters for a single short code.
#[derive(Debug, Clone, Copy)]
pub struct CodeStats {
    pub created: DateTime<Utc>,
    pub visits: i64,
}

/// Read-only statistics over links and the visit log.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    events: Arc<dyn EventLogRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, events: Arc<dyn EventLogRepository>) -> Self {
        Self { links, events }
    }

    /// Total stored links and successful redirects.
    pub async fn service_stats(&self) -> Result<ServiceStats, AppError> {
        let urls = self.links.count().await?;
        let visits = self.events.total_visits().await?;

        Ok(ServiceStats { urls, visits })
    }

    /// Creation time and visit count for one code, `None` for unknown codes.
    pub async fn code_stats(&self, code: &str) -> Result<Option<CodeStats>, AppError> {
        let Some(link) = self.links.find_by_code(code).await? else {
            return Ok(None);
        };

        let visits = self.events.visits_for_code(code).await?;

        Ok(Some(CodeStats {
            created: link.created_at,
            visits,
        }))
    }
}
