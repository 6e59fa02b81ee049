//! Utility modules supporting the client:
//!
//! - [`HttpClient`]: HTTP client with user-agent and timeout defaults
//! - [`normalize_topic`]: Trim and bound a user-entered topic before dispatch
//! - [`validate_resource_url`]: Check a response URL parses as http(s)
//! - [`ValidationError`]: Errors produced by the validation functions

mod http;
mod validate;

pub use http::HttpClient;
pub use validate::{normalize_topic, validate_resource_url, ValidationError};
