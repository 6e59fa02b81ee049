//! Google Gemini backend implementation.
//!
//! Talks to the `generateContent` REST endpoint and constrains the model to
//! a JSON response matching the [`TopicDetails`] shape via a
//! `responseSchema`, so the reply deserializes directly into the domain
//! model or fails as a shape error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::backend::{Backend, BackendError};
use crate::models::TopicDetails;
use crate::utils::HttpClient;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini backend
///
/// Stateless between calls; each `generate` performs exactly one outbound
/// request. No retries, no caching.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: HttpClient,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: HttpClient::with_timeout(timeout),
            api_key: api_key.into(),
            model: model.into(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (used by tests to point at a local server)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Build the instruction sent to the model for a topic
    fn build_prompt(topic: &str) -> String {
        format!(
            "You are an expert curriculum designer. Create a learning guide for the topic: \
             \"{}\". Provide a concise summary, why the topic matters, an overall difficulty \
             rating for a newcomer, a short list of related topics, and an ordered learning \
             path of 4 to 6 concrete resources (articles, videos, interactive tutorials, or \
             podcasts) progressing from fundamentals to deeper material. Use real, widely \
             known sources.",
            topic
        )
    }

    /// Schema the model's JSON output is constrained to.
    ///
    /// Field names and enum value sets must match the serde derives on
    /// [`TopicDetails`] exactly.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "topicName": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "whyItMatters": { "type": "STRING" },
                "difficulty": {
                    "type": "STRING",
                    "enum": ["Beginner", "Intermediate", "Advanced", "Expert"]
                },
                "relatedTopics": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "learningPath": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "type": {
                                "type": "STRING",
                                "enum": ["Read", "Watch", "Interact", "Listen"]
                            },
                            "title": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "source": { "type": "STRING" },
                            "url": { "type": "STRING" }
                        },
                        "required": ["type", "title", "description", "source", "url"]
                    }
                }
            },
            "required": [
                "topicName", "summary", "whyItMatters",
                "difficulty", "relatedTopics", "learningPath"
            ]
        })
    }

    fn request_body(topic: &str) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::build_prompt(topic) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema()
            }
        })
    }

    /// Extract and validate the TopicDetails payload from a decoded response
    fn parse_response(response: GenerateContentResponse) -> Result<TopicDetails, BackendError> {
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(BackendError::Blocked(reason.clone()));
            }
        }

        let text = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .find_map(|p| p.text)
            .ok_or_else(|| BackendError::Parse("response contained no text".to_string()))?;

        let details: TopicDetails = serde_json::from_str(&text)?;
        details.validate()?;
        Ok(details)
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    fn id(&self) -> &str {
        "gemini"
    }

    fn name(&self) -> &str {
        "Google Gemini"
    }

    async fn generate(&self, topic: &str) -> Result<TopicDetails, BackendError> {
        tracing::debug!(model = %self.model, topic, "requesting learning plan");

        let response = self
            .http
            .client()
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(topic))
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("Failed to reach Gemini: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or_else(|| format!("Gemini API returned status: {}", status));
            return Err(BackendError::Api(message));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Self::parse_response(decoded)
    }
}

// ===== Gemini API Types =====

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_json() -> String {
        r#"{
            "topicName": "Photosynthesis",
            "summary": "How plants convert light into chemical energy.",
            "whyItMatters": "It is the base of almost every food chain.",
            "difficulty": "Beginner",
            "relatedTopics": ["Cellular Respiration"],
            "learningPath": [
                {"type": "Read", "title": "Intro", "description": "d", "source": "s", "url": "https://example.com/1"}
            ]
        }"#
        .to_string()
    }

    fn wrap_candidate(text: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    parts: Some(vec![Part {
                        text: Some(text.to_string()),
                    }]),
                }),
            }]),
            prompt_feedback: None,
        }
    }

    #[test]
    fn test_parse_response_success() {
        let details = GeminiBackend::parse_response(wrap_candidate(&plan_json())).unwrap();
        assert_eq!(details.topic_name, "Photosynthesis");
        assert_eq!(details.learning_path.len(), 1);
    }

    #[test]
    fn test_parse_response_blocked() {
        let response = GenerateContentResponse {
            candidates: None,
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
            }),
        };
        match GeminiBackend::parse_response(response) {
            Err(BackendError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_no_candidates() {
        let response = GenerateContentResponse {
            candidates: Some(vec![]),
            prompt_feedback: None,
        };
        assert!(matches!(
            GeminiBackend::parse_response(response),
            Err(BackendError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_response_non_conforming_payload() {
        let result = GeminiBackend::parse_response(wrap_candidate(r#"{"topicName": "x"}"#));
        assert!(matches!(result, Err(BackendError::Parse(_))));
    }

    #[test]
    fn test_parse_response_bad_resource_url_is_shape_error() {
        let text = plan_json().replace("https://example.com/1", "not a url");
        let result = GeminiBackend::parse_response(wrap_candidate(&text));
        assert!(matches!(result, Err(BackendError::Shape(_))));
    }

    #[test]
    fn test_schema_matches_serde_field_names() {
        let schema = GeminiBackend::response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(required.contains(&"topicName"));
        assert!(required.contains(&"whyItMatters"));
        assert!(required.contains(&"learningPath"));

        let step_required = &schema["properties"]["learningPath"]["items"]["required"];
        assert!(step_required
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "url"));
    }

    #[test]
    fn test_prompt_includes_topic() {
        let prompt = GeminiBackend::build_prompt("Photosynthesis");
        assert!(prompt.contains("\"Photosynthesis\""));
    }

    #[test]
    fn test_endpoint_uses_configured_model() {
        let backend = GeminiBackend::new("key", "gemini-test", Duration::from_secs(5))
            .with_api_base("http://127.0.0.1:9");
        assert_eq!(
            backend.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-test:generateContent"
        );
    }
}
