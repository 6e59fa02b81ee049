//! Core data structures shared between the backend client and the shell.

mod topic;

pub use topic::{Difficulty, LearningResource, ResourceType, TopicDetails, TopicDetailsBuilder};
