//! Error types for pagewise
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Driver failures stay opaque: they are carried as `anyhow::Error` so a
//! page fetcher can surface whatever error type its transport produces.

use thiserror::Error;

/// The main error type for pagewise
#[derive(Error, Debug)]
pub enum Error {
    /// The paging layout could not be computed from the given settings
    #[error("Planning error: {message}")]
    Planning {
        /// What was wrong with the planner input
        message: String,
    },

    /// A page fetch failed in the injected driver
    #[error("Page fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),

    /// A strict single-result search yielded nothing
    #[error("No result found for {query}")]
    NotFound {
        /// Description of the search that came up empty
        query: String,
    },
}

impl Error {
    /// Create a planning error
    pub fn planning(message: impl Into<String>) -> Self {
        Self::Planning {
            message: message.into(),
        }
    }

    /// Create a fetch error from any driver error
    pub fn fetch(source: impl Into<anyhow::Error>) -> Self {
        Self::Fetch(source.into())
    }

    /// Create a not-found error
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Check if this is a driver fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Check if this is a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for pagewise
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::planning("max per page must be positive");
        assert_eq!(
            err.to_string(),
            "Planning error: max per page must be positive"
        );

        let err = Error::not_found("filters {\"id\": 42}");
        assert_eq!(err.to_string(), "No result found for filters {\"id\": 42}");

        let err = Error::fetch(anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "Page fetch failed: connection reset");
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::fetch(anyhow::anyhow!("boom")).is_fetch());
        assert!(!Error::fetch(anyhow::anyhow!("boom")).is_not_found());
        assert!(Error::not_found("user").is_not_found());
        assert!(!Error::planning("bad").is_fetch());
    }

    #[test]
    fn test_fetch_wraps_std_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = Error::fetch(io);
        assert!(err.to_string().contains("timed out"));
    }
}
