//! Link creation and resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::normalize_url;

/// Upper bound on fresh codes tried per request before giving up.
///
/// A hit means either the codespace is nearly full - at which point no retry
/// budget helps and the alphabet or length must grow - or the RNG is broken.
/// Either way, failing loudly beats looping forever.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Handles URL normalization, deduplication, and collision-free code
/// assignment.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    generator: CodeGenerator,
    base_url: String,
    allow_short_urls: bool,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix short URLs are built from;
    /// `allow_short_urls` disables the "would not get shorter" rejection.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        generator: CodeGenerator,
        base_url: String,
        allow_short_urls: bool,
    ) -> Self {
        Self {
            links,
            generator,
            base_url,
            allow_short_urls,
        }
    }

    /// Shortens a URL, returning the link and whether it was newly created.
    ///
    /// # Deduplication
    ///
    /// One normalized URL maps to exactly one code, service-wide. If the URL
    /// was already shortened - before this request or concurrently with it -
    /// the existing link is returned with `created = false`.
    ///
    /// # Code Assignment
    ///
    /// Candidate codes are random draws from the configured alphabet. An
    /// advance existence check filters out already-taken candidates cheaply,
    /// but the insert's unique constraints are the authoritative test: two
    /// requests can pass the same advance check, yet only one insert wins.
    /// The loser sees the violation and either retries with a fresh code
    /// (code collision) or adopts the winner's link (URL collision).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed URLs and for URLs that
    /// would not benefit from shortening, [`AppError::Internal`] when the
    /// retry budget is exhausted or the database fails.
    pub async fn shorten(&self, raw_url: &str, client_ip: &str) -> Result<(Link, bool), AppError> {
        let long_url = normalize_url(raw_url).map_err(|e| {
            AppError::bad_request(
                format!("The provided URL seems to be invalid: \"{raw_url}\""),
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !self.allow_short_urls && !self.worth_shortening(&long_url) {
            return Err(AppError::bad_request(
                "The submitted URL is already short and would not benefit from shortening",
                json!({ "url_length": long_url.len() }),
            ));
        }

        if let Some(existing) = self.links.find_by_long_url(&long_url).await? {
            return Ok((existing, false));
        }

        for attempt in 0..MAX_CODE_ATTEMPTS {
            let code = self.generator.generate();

            if self.links.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, "generated code already taken, retrying");
                continue;
            }

            let new_link = NewLink {
                code,
                long_url: long_url.clone(),
                client_ip: client_ip.to_string(),
            };

            match self.links.insert(new_link).await? {
                InsertOutcome::Created(link) => return Ok((link, true)),
                InsertOutcome::DuplicateCode => {
                    tracing::warn!(attempt, "code collision on insert, retrying");
                    continue;
                }
                InsertOutcome::DuplicateUrl => {
                    // A concurrent request shortened the same URL first;
                    // its link is the one to hand out.
                    let existing = self.links.find_by_long_url(&long_url).await?.ok_or_else(|| {
                        AppError::internal(
                            "URL reported as duplicate but not found",
                            json!({}),
                        )
                    })?;
                    return Ok((existing, false));
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its link.
    ///
    /// Codes that cannot have been produced by the generator (wrong length,
    /// foreign characters) are rejected without touching the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<Link>, AppError> {
        if !self.generator.matches(code) {
            return Ok(None);
        }

        self.links.find_by_code(code).await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// A URL is worth shortening when it is longer than the short URL that
    /// would replace it.
    fn worth_shortening(&self, long_url: &str) -> bool {
        let short_len = self.base_url.trim_end_matches('/').len() + 1 + self.generator.length();
        long_url.len() > short_len
    }
}
