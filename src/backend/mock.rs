//! Mock backend for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::backend::{Backend, BackendError};
use crate::models::{Difficulty, LearningResource, ResourceType, TopicDetails, TopicDetailsBuilder};

/// A mock backend that returns a predefined response or error.
#[derive(Debug, Default)]
pub struct MockBackend {
    response: Mutex<Option<Result<TopicDetails, String>>>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            response: Mutex::new(None),
        }
    }

    /// Set the details to return on the next calls.
    pub fn set_response(&self, details: TopicDetails) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Ok(details));
    }

    /// Make the next calls fail with an API error carrying this message.
    pub fn set_error(&self, message: impl Into<String>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Err(message.into()));
    }

    /// Clear the configured response.
    pub fn clear(&self) {
        let mut guard = self.response.lock().unwrap();
        *guard = None;
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Backend"
    }

    async fn generate(&self, topic: &str) -> Result<TopicDetails, BackendError> {
        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(Ok(details)) => Ok(details.clone()),
            Some(Err(message)) => Err(BackendError::Api(message.clone())),
            None => Ok(make_plan(topic)),
        }
    }
}

/// Helper to build a small well-formed plan for testing.
pub fn make_plan(topic: &str) -> TopicDetails {
    TopicDetailsBuilder::new(topic, Difficulty::Beginner)
        .summary(format!("A short overview of {}.", topic))
        .why_it_matters("Knowing this opens doors.")
        .related_topic("Adjacent topic")
        .step(LearningResource::new(
            ResourceType::Read,
            "First article",
            "Start here.",
            "Example Press",
            "https://example.com/read",
        ))
        .step(LearningResource::new(
            ResourceType::Watch,
            "Follow-up video",
            "Watch next.",
            "Example TV",
            "https://example.com/watch",
        ))
        .build()
}
