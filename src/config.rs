use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::Topic;

const APP_DIR: &str = "newsaura";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub default_topic: Topic,

    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_tick_rate() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            default_topic: Topic::default(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Config {
    /// Parse config from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a TOML string
    pub fn to_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_str(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        // Environment variables override config file values
        if let Ok(url) = std::env::var("NEWSAURA_API_URL") {
            config.api_base_url = url;
            config.validate()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, self.to_string()?)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.clamp(16, 1000))
    }

    fn validate(&mut self) -> Result<()> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        url::Url::parse(&trimmed)
            .map_err(|e| AppError::Config(format!("invalid api_base_url {:?}: {}", trimmed, e)))?;
        self.api_base_url = trimmed;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory holding config.toml and preferences.toml
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Directory holding the session file and the log
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default values ====================

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.default_topic, Topic::General);
        assert_eq!(config.tick_rate_ms, 250);
    }

    // ==================== TOML parsing ====================

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
api_base_url = "https://api.newsaura.example"
request_timeout_secs = 30
default_topic = "technology"
tick_rate_ms = 100
"#;

        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.api_base_url, "https://api.newsaura.example");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.default_topic, Topic::Technology);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.default_topic, Topic::General);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = Config::from_str(r#"api_base_url = "http://10.0.0.2:8000/""#).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.2:8000");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::from_str("this is not valid toml [[[");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_topic() {
        let result = Config::from_str(r#"default_topic = "weather""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_url() {
        let result = Config::from_str(r#"api_base_url = "not a url""#);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    // ==================== Serialization ====================

    #[test]
    fn test_serialize_config() {
        let config = Config {
            api_base_url: "http://example.com".to_string(),
            request_timeout_secs: 5,
            default_topic: Topic::Sports,
            tick_rate_ms: 200,
        };

        let toml = config.to_string().unwrap();

        assert!(toml.contains("api_base_url = \"http://example.com\""));
        assert!(toml.contains("default_topic = \"sports\""));
        assert!(toml.contains("request_timeout_secs = 5"));
    }

    // ==================== Edge cases ====================

    #[test]
    fn test_durations_are_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            tick_rate_ms: 5,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
        assert_eq!(config.tick_rate(), Duration::from_millis(16));
    }

    #[test]
    fn test_config_path_contains_app_dir() {
        let path = Config::config_path();
        assert!(path.to_string_lossy().contains("newsaura"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
