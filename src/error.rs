//! Error types for the Deezer API.

use thiserror::Error;

/// Main error type for all Deezer operations.
#[derive(Debug, Error)]
pub enum DeezerError {
    /// HTTP request failed (network error or non-2xx status).
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Deezer answered with an `error` object.
    #[error("API error: {0}")]
    ApiError(String),

    /// A response lacked a field the entity needs, or carried it with the wrong type.
    #[error("Malformed {entity} response: {reason}")]
    MalformedResponse {
        /// Entity being decoded ("track", "album", ...).
        entity: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// An expand operation was called on an entity without the related id.
    #[error("No {0} id to follow")]
    MissingReference(&'static str),

    /// Cursor pagination was aborted (cycle or page cap).
    #[error("Pagination aborted: {0}")]
    Pagination(String),

    /// Invalid configuration value or missing credential.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeezerError {
    pub(crate) fn malformed(entity: &'static str, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            entity,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for Deezer operations.
pub type Result<T> = std::result::Result<T, DeezerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = DeezerError::malformed("album", "missing field `cover`");
        assert_eq!(
            err.to_string(),
            "Malformed album response: missing field `cover`"
        );
    }

    #[test]
    fn test_missing_reference_display() {
        assert_eq!(
            DeezerError::MissingReference("artist").to_string(),
            "No artist id to follow"
        );
    }
}
