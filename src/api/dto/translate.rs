//! DTO for the code translation endpoint.

use serde::Serialize;

/// A code resolved back to its original URL.
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub code: String,
    pub long_url: String,
}
