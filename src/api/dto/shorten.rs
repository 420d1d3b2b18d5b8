//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

/// A successfully shortened URL.
///
/// `created` is false when the URL had already been shortened; the existing
/// code is returned instead of a new one.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub created: bool,
}
