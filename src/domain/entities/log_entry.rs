//! Entries for the append-only outcome logs.
//!
//! Every redirect, shortening attempt and translation is recorded with the
//! HTTP response it produced, successful or not. The insert log doubles as
//! the data source for rate limiting: the limiter counts a client's recent
//! entries (all of them under strict limits, successful ones otherwise).

/// A redirect attempt (`GET /{code}`), successful (301/307) or not (404).
#[derive(Debug, Clone)]
pub struct NewVisitEntry {
    pub code: String,
    pub response: u16,
    pub client_ip: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// A shortening attempt (`POST /api`). `code` is empty when no code was
/// produced (validation failures, rate-limited requests).
#[derive(Debug, Clone)]
pub struct NewInsertEntry {
    pub code: String,
    pub response: u16,
    pub client_ip: String,
}

/// A code translation (`GET /api/{code}`).
#[derive(Debug, Clone)]
pub struct NewTranslateEntry {
    pub code: String,
    pub response: u16,
    pub client_ip: String,
}
