//! Whitelist/blacklist admission control.
//!
//! Decides whether a client may reach an endpoint at all, before any business
//! logic runs. Two ingredients: a scope rule selecting which (path, method)
//! pairs are protected, and a precedence rule combining whitelist and
//! blacklist membership for protected requests.

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::Method;

/// Path prefix of the shortening/translation API.
const API_PREFIX: &str = "/api";
/// Path prefix of the statistics endpoints.
const STATS_PREFIX: &str = "/stats";

/// Which requests list-based filtering applies to.
///
/// Configured as an integer 0-3 (`LIST_SCOPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeLevel {
    /// Filtering disabled; every request is admitted without consulting lists.
    Off,
    /// Only POST requests to the API are protected.
    ApiPostOnly,
    /// POST and GET requests to the API, plus the stats endpoints.
    ApiAndStats,
    /// Every request to the service is protected.
    All,
}

impl TryFrom<u8> for ScopeLevel {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::ApiPostOnly),
            2 => Ok(Self::ApiAndStats),
            3 => Ok(Self::All),
            other => anyhow::bail!("list scope must be 0-3, got {other}"),
        }
    }
}

impl ScopeLevel {
    /// Returns true if a request to `path` with `method` falls under list
    /// filtering at this scope level.
    pub fn covers(self, path: &str, method: &Method) -> bool {
        match self {
            ScopeLevel::Off => false,
            ScopeLevel::ApiPostOnly => *method == Method::POST && path.starts_with(API_PREFIX),
            ScopeLevel::ApiAndStats => {
                let api_method = *method == Method::POST || *method == Method::GET;
                (api_method && path.starts_with(API_PREFIX)) || path.starts_with(STATS_PREFIX)
            }
            ScopeLevel::All => true,
        }
    }

    /// What a denied client was denied access to, for the 403 message.
    fn denied_scope(self) -> DeniedScope {
        match self {
            ScopeLevel::All => DeniedScope::Service,
            _ => DeniedScope::Api,
        }
    }
}

/// What a denial covers: only the API endpoints, or the whole service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedScope {
    Api,
    Service,
}

impl std::fmt::Display for DeniedScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeniedScope::Api => f.write_str("the API"),
            DeniedScope::Service => f.write_str("this service"),
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DeniedScope),
}

/// Result of pure list evaluation, before scope context is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Allow,
    Deny,
}

/// Immutable whitelist/blacklist membership, loaded once at startup.
///
/// `None` means the list is disabled and excluded from evaluation entirely,
/// which is different from an enabled-but-empty list: an empty whitelist
/// denies everyone, a disabled one constrains no one. Shared as
/// `Arc<ListSnapshot>`; a future reload would swap the whole snapshot rather
/// than mutate it in place.
#[derive(Debug, Default)]
pub struct ListSnapshot {
    pub whitelist: Option<HashSet<String>>,
    pub blacklist: Option<HashSet<String>>,
}

impl ListSnapshot {
    pub fn new(whitelist: Option<HashSet<String>>, blacklist: Option<HashSet<String>>) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }
}

/// Combines whitelist and blacklist membership under the configured
/// precedence.
///
/// The logic is order-sensitive by design, not a set difference:
///
/// - With `whitelist_last` set, the blacklist is evaluated first and the
///   whitelist "gets the last word": a client passes when not blacklisted at
///   all, or blacklisted but vouched for by the whitelist.
/// - Without it, the whitelist is the gate and the blacklist the veto: only
///   clients on the whitelist and absent from the blacklist pass.
fn evaluate_lists(
    client_id: &str,
    whitelist: Option<&HashSet<String>>,
    blacklist: Option<&HashSet<String>>,
    whitelist_last: bool,
) -> Access {
    match (whitelist, blacklist) {
        (Some(white), Some(black)) => {
            if whitelist_last {
                if !black.contains(client_id) {
                    Access::Allow
                } else if white.contains(client_id) {
                    Access::Allow
                } else {
                    Access::Deny
                }
            } else if !white.contains(client_id) {
                Access::Deny
            } else if black.contains(client_id) {
                Access::Deny
            } else {
                Access::Allow
            }
        }
        (Some(white), None) => {
            if white.contains(client_id) {
                Access::Allow
            } else {
                Access::Deny
            }
        }
        (None, Some(black)) => {
            if black.contains(client_id) {
                Access::Deny
            } else {
                Access::Allow
            }
        }
        (None, None) => Access::Allow,
    }
}

/// Admission control service: scope rule + list precedence over a loaded
/// snapshot.
///
/// Evaluation is pure computation over immutable data, so concurrent checks
/// need no synchronization.
pub struct AdmissionService {
    scope: ScopeLevel,
    whitelist_last: bool,
    lists: Arc<ListSnapshot>,
}

impl AdmissionService {
    pub fn new(scope: ScopeLevel, whitelist_last: bool, lists: Arc<ListSnapshot>) -> Self {
        Self {
            scope,
            whitelist_last,
            lists,
        }
    }

    /// Decides whether `client_id` may proceed with a request to `path`.
    ///
    /// Requests outside the configured scope are admitted without consulting
    /// the lists at all.
    pub fn admit(&self, client_id: &str, path: &str, method: &Method) -> Decision {
        if !self.scope.covers(path, method) {
            return Decision::Allow;
        }

        match evaluate_lists(
            client_id,
            self.lists.whitelist.as_ref(),
            self.lists.blacklist.as_ref(),
            self.whitelist_last,
        ) {
            Access::Allow => Decision::Allow,
            Access::Deny => Decision::Deny(self.scope.denied_scope()),
        }
    }
}
