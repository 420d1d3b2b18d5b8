//! DTOs for the statistics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Service-wide statistics.
#[derive(Debug, Serialize)]
pub struct ServiceStatsResponse {
    /// Number of shortened URLs stored.
    pub urls: i64,
    /// Number of successful redirects served.
    pub visits: i64,
}

/// Statistics for a single short code.
#[derive(Debug, Serialize)]
pub struct CodeStatsResponse {
    pub created: DateTime<Utc>,
    pub visits: i64,
}
