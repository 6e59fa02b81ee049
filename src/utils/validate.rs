//! Input and response validation at the backend boundary.
//!
//! Topic strings come straight from the user and response URLs come straight
//! from the model; both are checked here before anything else touches them.

use thiserror::Error;

/// Longest topic the client will send to the backend.
const MAX_TOPIC_LENGTH: usize = 500;

/// Validation error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a topic to explore")]
    EmptyTopic,

    #[error("Topic is too long (max {MAX_TOPIC_LENGTH} characters)")]
    TopicTooLong,

    #[error("Topic contains control characters")]
    ControlCharacters,

    #[error("Response is missing required text: {0}")]
    MissingText(&'static str),

    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),
}

/// Normalize a user-entered topic before dispatch.
///
/// Trims surrounding whitespace and rejects empty, over-long, or
/// control-character input. An empty or whitespace-only topic must never
/// reach the network.
pub fn normalize_topic(topic: &str) -> Result<String, ValidationError> {
    let topic = topic.trim();

    if topic.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }

    if topic.chars().count() > MAX_TOPIC_LENGTH {
        return Err(ValidationError::TopicTooLong);
    }

    for ch in topic.chars() {
        if ch.is_control() {
            return Err(ValidationError::ControlCharacters);
        }
    }

    Ok(topic.to_string())
}

/// Validate a resource locator from a backend response.
///
/// Reachability is not checked; the URL only has to parse and use an
/// http(s) scheme so the rendered link is safe to open.
pub fn validate_resource_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::InvalidUrl(format!(
            "invalid scheme: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_topic_valid() {
        assert_eq!(normalize_topic("Photosynthesis").unwrap(), "Photosynthesis");
        assert_eq!(normalize_topic("  rust async  ").unwrap(), "rust async");
        assert!(normalize_topic("量子コンピュータ").is_ok());
    }

    #[test]
    fn test_normalize_topic_empty() {
        assert_eq!(normalize_topic(""), Err(ValidationError::EmptyTopic));
        assert_eq!(normalize_topic("   "), Err(ValidationError::EmptyTopic));
        assert_eq!(normalize_topic("\t\n"), Err(ValidationError::EmptyTopic));
    }

    #[test]
    fn test_normalize_topic_too_long() {
        let long = "a".repeat(MAX_TOPIC_LENGTH + 1);
        assert_eq!(normalize_topic(&long), Err(ValidationError::TopicTooLong));
        let at_limit = "a".repeat(MAX_TOPIC_LENGTH);
        assert!(normalize_topic(&at_limit).is_ok());
    }

    #[test]
    fn test_normalize_topic_control_chars() {
        assert_eq!(
            normalize_topic("foo\u{0}bar"),
            Err(ValidationError::ControlCharacters)
        );
        // Interior newlines are control characters too
        assert_eq!(
            normalize_topic("foo\nbar"),
            Err(ValidationError::ControlCharacters)
        );
    }

    #[test]
    fn test_validate_resource_url_valid() {
        assert!(validate_resource_url("https://developer.mozilla.org/docs").is_ok());
        assert!(validate_resource_url("http://example.com/course").is_ok());
    }

    #[test]
    fn test_validate_resource_url_invalid() {
        assert!(validate_resource_url("").is_err());
        assert!(validate_resource_url("not a url").is_err());
        assert!(validate_resource_url("ftp://example.com").is_err());
        assert!(validate_resource_url("javascript:alert(1)").is_err());
        assert!(validate_resource_url("data:text/html,hi").is_err());
    }
}
