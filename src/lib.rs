//! # Learning Nexus
//!
//! A terminal client that turns any free-text topic into an AI-curated,
//! step-by-step learning path.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (TopicDetails, LearningResource, etc.)
//! - [`backend`]: Generative-AI backend clients behind the [`backend::Backend`] trait
//! - [`shell`]: UI state machine, rendering, and the interactive loop
//! - [`ui`]: Terminal output helpers (icons, spinners, truncation)
//! - [`utils`]: HTTP client and input validation
//! - [`config`]: Configuration management

pub mod backend;
pub mod config;
pub mod models;
pub mod shell;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use backend::{Backend, BackendError};
pub use models::TopicDetails;
pub use shell::{Event, Phase, ShellState, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
