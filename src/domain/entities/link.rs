//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL mapping.
///
/// Codes are immutable once persisted: a link is only ever created and read,
/// never updated.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// `client_ip` records who shortened the URL, for audit and abuse tracking.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub client_ip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc12".to_string(),
            "https://example.com/".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc12");
        assert_eq!(link.long_url, "https://example.com/");
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink {
            code: "xyz78".to_string(),
            long_url: "https://rust-lang.org/".to_string(),
            client_ip: "203.0.113.7".to_string(),
        };

        assert_eq!(new_link.code, "xyz78");
        assert_eq!(new_link.long_url, "https://rust-lang.org/");
        assert_eq!(new_link.client_ip, "203.0.113.7");
    }
}
