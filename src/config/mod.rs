//! Configuration management.
//!
//! Settings come from a TOML file with environment variable overrides
//! (prefix `LEARNING_NEXUS_`, e.g. `LEARNING_NEXUS_BACKEND__MODEL`).
//! The API key may also be supplied through `GEMINI_API_KEY`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [backend]
//! api_key = "your-gemini-api-key"
//! model = "gemini-2.5-flash"
//! timeout_secs = 30
//!
//! [ui]
//! theme = "dark"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::backend::gemini::DEFAULT_MODEL;
use crate::shell::Theme;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Gemini API key. Falls back to the GEMINI_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Override for the API base URL. Used for testing.
    #[serde(default)]
    pub api_base: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_base: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial theme, "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Config {
    /// Resolve the API key from config or the GEMINI_API_KEY environment
    /// variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.backend
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// The configured theme. Unknown values fall back to dark.
    pub fn theme(&self) -> Theme {
        match self.ui.theme.to_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("LEARNING_NEXUS").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("LEARNING_NEXUS").separator("__"))
        .build();

    settings
        .and_then(|s| s.try_deserialize())
        .unwrap_or_default()
}

/// Find a config file in the standard locations.
///
/// Checks `./learning-nexus.toml` first, then
/// `$XDG_CONFIG_HOME/learning-nexus/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("learning-nexus.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("learning-nexus").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.model, DEFAULT_MODEL);
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.api_key.is_none());
        assert_eq!(config.theme(), Theme::Dark);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[backend]
api_key = "test-key"
model = "gemini-2.5-pro"

[ui]
theme = "light"
"#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.backend.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.backend.model, "gemini-2.5-pro");
        // Unset fields keep their defaults
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.theme(), Theme::Light);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let config = Config {
            ui: UiConfig {
                theme: "solarized".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(config.theme(), Theme::Dark);
    }
}
