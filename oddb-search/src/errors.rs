//! Error types for subject lookups.

use thiserror::Error;

/// Errors that can occur while resolving subjects, images or metadata.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Subject identifier was empty or whitespace.
    #[error("Subject identifier is empty")]
    EmptyIdentifier,

    /// Search returned no candidates for the query.
    #[error("No match found for '{query}'")]
    NoMatchFound {
        /// The (cleaned) query that matched nothing
        query: String,
    },

    /// Transport or decoding failure while talking to a remote.
    #[error("Remote fetch failed for {url}: {reason}")]
    RemoteFetchFailure {
        /// The URL being fetched
        url: String,
        /// The reason for the failure
        reason: String,
    },

    /// Remote answered with a non-success HTTP status.
    #[error("Remote returned HTTP {status} for {url}")]
    BadStatus {
        /// The URL being fetched
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Configured name cleaning pattern is not a valid regex.
    #[error("Invalid name pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,
}

impl SearchError {
    /// Returns true for cooperative cancellation, as opposed to a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn remote(url: &str, error: impl std::fmt::Display) -> Self {
        SearchError::RemoteFetchFailure {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
