//! Typed errors for the newsdesk library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each external collaborator
//! gets its own enum; [`VerifyError`] is what a verification caller sees.

use std::time::Duration;

use thiserror::Error;

/// Errors a verification request can end in.
///
/// Research and persistence failures never appear here: both are
/// absorbed by the pipeline and only logged.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Required input missing or blank
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// A mandatory credential is not configured
    #[error("fact-check service not configured: set {credential}")]
    Configuration { credential: &'static str },

    /// The generative-text call failed or returned nothing
    #[error("generative-text service failed: {0}")]
    Upstream(#[from] GenerationError),
}

/// Errors from a generative-text or research transport.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Call exceeded its deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-success response from the provider
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Success status but no usable text
    #[error("provider returned an empty reply")]
    EmptyReply,

    /// Reply could not be decoded
    #[error("malformed provider reply: {0}")]
    Malformed(String),

    /// Client could not be constructed
    #[error("client configuration error: {0}")]
    Config(String),
}

/// Errors from the optional research augmentation step.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// No research credential configured
    #[error("research service not configured")]
    NotConfigured,

    /// Research call exceeded its deadline
    #[error("research timed out after {0:?}")]
    Timeout(Duration),

    /// Research provider failed
    #[error("research service error: {0}")]
    Service(#[from] GenerationError),
}

/// Errors from the article storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id
    #[error("article not found: {id}")]
    NotFound { id: String },

    /// Store call exceeded its deadline
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Backend failure
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(e))
    }
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Result type alias for transport calls.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Result type alias for research calls.
pub type ResearchResult<T> = std::result::Result<T, ResearchError>;

/// Result type alias for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = VerifyError::Validation { field: "title" };
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_configuration_message_is_actionable() {
        let err = VerifyError::Configuration {
            credential: "OPENAI_API_KEY",
        };
        assert!(err.to_string().contains("set OPENAI_API_KEY"));
    }

    #[test]
    fn test_upstream_wraps_generation_error() {
        let err: VerifyError = GenerationError::EmptyReply.into();
        assert!(matches!(err, VerifyError::Upstream(GenerationError::EmptyReply)));
    }
}
