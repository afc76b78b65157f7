use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WayfarerError};

/// Top-level configuration for the Wayfarer agent.
///
/// Loaded from `~/.wayfarer/config.toml` by default. Every section falls back
/// to its defaults when absent, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WayfarerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub gazetteer: GazetteerConfig,
}

impl WayfarerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WayfarerConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WayfarerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Dialogue engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the agent accepts turns at all.
    pub enabled: bool,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Minimum classification confidence before a plan is built.
    pub min_plan_confidence: f32,
    /// Follow-up turns below this confidence get a canned "ask again" reply.
    pub follow_up_threshold: f32,
    /// Conversations idle longer than this are evicted.
    pub session_timeout_minutes: u32,
    /// Upper bound on live conversations; the least recently active is evicted.
    pub max_conversations: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
            min_plan_confidence: 0.25,
            follow_up_threshold: 0.4,
            session_timeout_minutes: 120,
            max_conversations: 10_000,
        }
    }
}

/// Defaults applied by the search tools when the user leaves slots empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Length of the default stay / rental window, starting today.
    pub default_stay_nights: u32,
    /// Party size used when no guest count was given.
    pub default_guests: u32,
    /// Maximum number of records kept from a single search.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_stay_nights: 5,
            default_guests: 2,
            max_results: 10,
        }
    }
}

/// Known destination names used for location extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteerConfig {
    pub destinations: Vec<String>,
}

impl Default for GazetteerConfig {
    fn default() -> Self {
        let destinations = [
            "New York", "Los Angeles", "San Francisco", "Las Vegas", "Chicago", "Miami",
            "Seattle", "Boston", "Honolulu", "Cancun", "Mexico City", "Toronto", "Vancouver",
            "London", "Paris", "Rome", "Milan", "Venice", "Florence", "Barcelona", "Madrid",
            "Lisbon", "Amsterdam", "Berlin", "Munich", "Vienna", "Prague", "Zurich", "Athens",
            "Santorini", "Istanbul", "Dubai", "Tokyo", "Kyoto", "Seoul", "Singapore", "Bangkok",
            "Bali", "Sydney", "Hong Kong",
        ];
        Self {
            destinations: destinations.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = WayfarerConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.chat.enabled);
        assert_eq!(config.chat.max_message_length, 2000);
        assert!((config.chat.follow_up_threshold - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.search.default_stay_nights, 5);
        assert_eq!(config.search.default_guests, 2);
        assert!(config.gazetteer.destinations.contains(&"Rome".to_string()));
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[chat]
enabled = false
max_message_length = 500
min_plan_confidence = 0.5
follow_up_threshold = 0.3
session_timeout_minutes = 15
max_conversations = 8

[search]
default_stay_nights = 3
default_guests = 1
max_results = 4

[gazetteer]
destinations = ["Reykjavik", "Oslo"]
"#;
        let file = create_temp_config(content);
        let config = WayfarerConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(!config.chat.enabled);
        assert_eq!(config.chat.max_message_length, 500);
        assert!((config.chat.min_plan_confidence - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.chat.session_timeout_minutes, 15);
        assert_eq!(config.chat.max_conversations, 8);
        assert_eq!(config.search.default_stay_nights, 3);
        assert_eq!(config.search.max_results, 4);
        assert_eq!(config.gazetteer.destinations, vec!["Reykjavik", "Oslo"]);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
max_message_length = 100
"#;
        let file = create_temp_config(content);
        let config = WayfarerConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.max_message_length, 100);
        // Remaining fields use defaults
        assert!(config.chat.enabled);
        assert_eq!(config.search.default_guests, 2);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = WayfarerConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.session_timeout_minutes, 120);
        assert_eq!(config.search.max_results, 10);
        assert!(!config.gazetteer.destinations.is_empty());
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = WayfarerConfig::load(file.path());
        assert!(matches!(result, Err(WayfarerError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = WayfarerConfig::load_or_default(Path::new("/nonexistent/wayfarer.toml"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.chat.max_conversations, 10_000);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = WayfarerConfig::default();
        config.search.default_guests = 4;
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = WayfarerConfig::load(&path).unwrap();
        assert_eq!(reloaded.search.default_guests, 4);
        assert_eq!(
            reloaded.gazetteer.destinations.len(),
            config.gazetteer.destinations.len()
        );
    }
}
