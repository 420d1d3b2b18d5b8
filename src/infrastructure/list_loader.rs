//! Whitelist/blacklist file loading.
//!
//! A list file holds one client address per line. Blank lines and `#`
//! comments are skipped.

use anyhow::{Context, Result};
use std::collections::HashSet;

/// Reads a list file into a membership set.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn load_list(path: &str) -> Result<HashSet<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read list file '{path}'"))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Loads an optional list, treating failure as "list disabled".
///
/// A configured-but-unreadable list is logged and dropped rather than
/// failing startup: the service comes up unfiltered on that list. That is a
/// permissive default; deployments relying on a whitelist as their only
/// barrier should monitor for the error log line.
pub async fn load_optional_list(path: Option<&str>, name: &str) -> Option<HashSet<String>> {
    let path = path?;

    match load_list(path).await {
        Ok(list) => {
            tracing::info!(list = name, path, entries = list.len(), "loaded client list");
            Some(list)
        }
        Err(e) => {
            tracing::error!(list = name, path, error = %e, "failed to load client list, treating it as disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_list(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("shortnr-list-{name}-{}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_list_skips_blanks_and_comments() {
        let path = write_temp_list(
            "basic",
            "203.0.113.7\n\n# gateway range\n198.51.100.9\n  192.0.2.1  \n",
        );

        let list = load_list(path.to_str().unwrap()).await.unwrap();

        assert_eq!(list.len(), 3);
        assert!(list.contains("203.0.113.7"));
        assert!(list.contains("192.0.2.1"));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        assert!(load_list("/nonexistent/shortnr-list").await.is_err());
    }

    #[tokio::test]
    async fn test_optional_list_fails_open() {
        assert!(load_optional_list(None, "whitelist").await.is_none());
        assert!(
            load_optional_list(Some("/nonexistent/shortnr-list"), "whitelist")
                .await
                .is_none()
        );
    }
}
