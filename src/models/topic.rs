//! Topic model representing the structured learning plan for one query.

use serde::{Deserialize, Serialize};

use crate::utils::{validate_resource_url, ValidationError};

/// How demanding a topic is for a newcomer.
///
/// Closed set; the backend is constrained to these exact labels and any other
/// value is rejected during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// Returns the display label of the difficulty
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a learning resource is consumed. Drives the icon/label at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Read,
    Watch,
    Interact,
    Listen,
}

impl ResourceType {
    /// Returns the display label of the resource type
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Read => "Read",
            ResourceType::Watch => "Watch",
            ResourceType::Interact => "Interact",
            ResourceType::Listen => "Listen",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One recommended step in a learning path.
///
/// Resources carry no stable id; they are identified by their position in the
/// containing [`TopicDetails::learning_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    /// How the resource is consumed
    #[serde(rename = "type")]
    pub kind: ResourceType,

    /// Resource title
    pub title: String,

    /// Short description of what the step covers
    pub description: String,

    /// Publisher or site name, e.g. "MDN" or "YouTube"
    pub source: String,

    /// Where to find the resource (not checked for reachability)
    pub url: String,
}

impl LearningResource {
    /// Create a new resource with the given fields
    pub fn new(
        kind: ResourceType,
        title: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            source: source.into(),
            url: url.into(),
        }
    }
}

/// The full structured response for one topic query.
///
/// Instances are created fresh on each successful search, held by the shell
/// for one render cycle, and replaced (or cleared) by the next search. Both
/// sequences preserve backend order; the learning path renders top to bottom
/// in exactly the order received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetails {
    /// The topic as the backend understood it
    pub topic_name: String,

    /// Plain-language summary of the topic
    pub summary: String,

    /// Why the topic is worth learning
    pub why_it_matters: String,

    /// Overall difficulty for a newcomer
    pub difficulty: Difficulty,

    /// Adjacent topics worth exploring, in display order
    pub related_topics: Vec<String>,

    /// Ordered sequence of recommended steps
    pub learning_path: Vec<LearningResource>,
}

impl TopicDetails {
    /// Check the parts of the response contract serde cannot enforce:
    /// non-empty display text and a well-formed http(s) URL on every step.
    ///
    /// Serde already rejects missing fields and unknown enum values; this
    /// pass rejects structurally present but unusable data so the shell
    /// never renders a partially valid plan.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic_name.trim().is_empty() {
            return Err(ValidationError::MissingText("topicName"));
        }
        if self.summary.trim().is_empty() {
            return Err(ValidationError::MissingText("summary"));
        }
        for resource in &self.learning_path {
            if resource.title.trim().is_empty() {
                return Err(ValidationError::MissingText("learningPath[].title"));
            }
            validate_resource_url(&resource.url)?;
        }
        Ok(())
    }
}

/// Builder for constructing TopicDetails values in tests and mock backends
#[derive(Debug, Clone)]
pub struct TopicDetailsBuilder {
    details: TopicDetails,
}

impl TopicDetailsBuilder {
    /// Create a new builder with the required display fields
    pub fn new(topic_name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            details: TopicDetails {
                topic_name: topic_name.into(),
                summary: String::new(),
                why_it_matters: String::new(),
                difficulty,
                related_topics: Vec::new(),
                learning_path: Vec::new(),
            },
        }
    }

    /// Set the summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.details.summary = summary.into();
        self
    }

    /// Set the motivation text
    pub fn why_it_matters(mut self, text: impl Into<String>) -> Self {
        self.details.why_it_matters = text.into();
        self
    }

    /// Append a related topic
    pub fn related_topic(mut self, topic: impl Into<String>) -> Self {
        self.details.related_topics.push(topic.into());
        self
    }

    /// Append a learning-path step
    pub fn step(mut self, resource: LearningResource) -> Self {
        self.details.learning_path.push(resource);
        self
    }

    /// Build the TopicDetails
    pub fn build(self) -> TopicDetails {
        self.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resource() -> LearningResource {
        LearningResource::new(
            ResourceType::Read,
            "Intro article",
            "A gentle first pass over the basics.",
            "Example Press",
            "https://example.com/intro",
        )
    }

    #[test]
    fn test_builder() {
        let details = TopicDetailsBuilder::new("Photosynthesis", Difficulty::Beginner)
            .summary("How plants turn light into sugar.")
            .why_it_matters("It feeds nearly everything on Earth.")
            .related_topic("Cellular Respiration")
            .step(sample_resource())
            .build();

        assert_eq!(details.topic_name, "Photosynthesis");
        assert_eq!(details.difficulty, Difficulty::Beginner);
        assert_eq!(details.related_topics, vec!["Cellular Respiration"]);
        assert_eq!(details.learning_path.len(), 1);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let details = TopicDetailsBuilder::new("Rust", Difficulty::Intermediate)
            .summary("A systems language.")
            .why_it_matters("Memory safety without garbage collection.")
            .step(sample_resource())
            .build();

        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("topicName").is_some());
        assert!(json.get("whyItMatters").is_some());
        assert!(json.get("relatedTopics").is_some());
        assert!(json.get("learningPath").is_some());
        assert_eq!(json["learningPath"][0]["type"], "Read");
    }

    #[test]
    fn test_deserialize_rejects_missing_url() {
        let payload = r#"{
            "topicName": "Rust",
            "summary": "s",
            "whyItMatters": "w",
            "difficulty": "Beginner",
            "relatedTopics": [],
            "learningPath": [
                {"type": "Read", "title": "t", "description": "d", "source": "s"}
            ]
        }"#;

        let result: Result<TopicDetails, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_difficulty() {
        let payload = r#"{
            "topicName": "Rust",
            "summary": "s",
            "whyItMatters": "w",
            "difficulty": "Impossible",
            "relatedTopics": [],
            "learningPath": []
        }"#;

        let result: Result<TopicDetails, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_learning_path_preserves_wire_order() {
        let payload = r#"{
            "topicName": "Rust",
            "summary": "s",
            "whyItMatters": "w",
            "difficulty": "Advanced",
            "relatedTopics": ["C++", "Zig"],
            "learningPath": [
                {"type": "Read", "title": "first", "description": "", "source": "", "url": "https://example.com/1"},
                {"type": "Watch", "title": "second", "description": "", "source": "", "url": "https://example.com/2"},
                {"type": "Interact", "title": "third", "description": "", "source": "", "url": "https://example.com/3"}
            ]
        }"#;

        let details: TopicDetails = serde_json::from_str(payload).unwrap();
        let titles: Vec<&str> = details
            .learning_path
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(details.related_topics, vec!["C++", "Zig"]);
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let details = TopicDetailsBuilder::new("Rust", Difficulty::Beginner)
            .summary("s")
            .step(LearningResource::new(
                ResourceType::Watch,
                "   ",
                "d",
                "s",
                "https://example.com",
            ))
            .build();

        assert!(details.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url_scheme() {
        let details = TopicDetailsBuilder::new("Rust", Difficulty::Beginner)
            .summary("s")
            .step(LearningResource::new(
                ResourceType::Read,
                "t",
                "d",
                "s",
                "javascript:alert(1)",
            ))
            .build();

        assert!(details.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_plan() {
        let details = TopicDetailsBuilder::new("Rust", Difficulty::Beginner)
            .summary("s")
            .why_it_matters("w")
            .step(sample_resource())
            .build();

        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Difficulty::Beginner.to_string(), "Beginner");
        assert_eq!(Difficulty::Expert.to_string(), "Expert");
        assert_eq!(ResourceType::Interact.to_string(), "Interact");
    }
}
