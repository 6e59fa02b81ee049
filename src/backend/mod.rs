//! Generative-AI backend clients.
//!
//! This module defines the [`Backend`] trait that all backends implement.
//! A backend translates one free-text topic into a validated
//! [`TopicDetails`] value with exactly one outbound call per invocation and
//! no state between calls. [`GeminiBackend`] is the production
//! implementation; [`MockBackend`] serves tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiBackend, DEFAULT_MODEL};
pub use mock::MockBackend;

use crate::models::TopicDetails;
use crate::utils::ValidationError;
use async_trait::async_trait;

/// The Backend trait defines the interface to a generative-AI collaborator.
///
/// Implementations must request a structured, schema-constrained response
/// and fail rather than return partially-shaped data: a successful
/// `generate` call always yields a `TopicDetails` that passed
/// [`TopicDetails::validate`].
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this backend (e.g. "gemini")
    fn id(&self) -> &str;

    /// Human-readable name of this backend
    fn name(&self) -> &str;

    /// Generate a learning plan for the given topic.
    ///
    /// The topic is expected to be pre-normalized (trimmed, non-empty);
    /// callers go through [`crate::utils::normalize_topic`] first.
    async fn generate(&self, topic: &str) -> Result<TopicDetails, BackendError>;
}

/// Errors that can occur when talking to a backend.
///
/// The shell collapses all of these into one human-readable message; the
/// variants exist so logs and tests can tell the failure kinds apart.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Backend unreachable or transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Backend explicitly reported an error for the query
    #[error("Backend error: {0}")]
    Api(String),

    /// The query was rejected by backend-side policy
    #[error("Request blocked by the backend: {0}")]
    Blocked(String),

    /// Response payload could not be parsed
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Response parsed but does not conform to the TopicDetails shape
    #[error("Response failed validation: {0}")]
    Shape(#[from] ValidationError),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = BackendError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = BackendError::Shape(ValidationError::MissingText("summary"));
        assert!(err.to_string().contains("summary"));
    }
}
