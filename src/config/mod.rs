use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::github::DEFAULT_API_BASE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// REST API root the users endpoint hangs off
    pub api_base: String,

    /// Sent on every request (GitHub requires one)
    pub user_agent: String,

    /// Overall request timeout. None leaves it to the HTTP stack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Start in dark mode. Toggling in the UI does not write this back.
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: format!("hubpeek/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
            dark_mode: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("hubpeek");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };
        tracing::debug!("Config path: {}", path.display());

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {:#}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Leave a broken file alone so the user can fix it
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {:#}", e);
        }
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content).context("Invalid config.toml")?;

        if config.api_base.trim().is_empty() {
            config.api_base = DEFAULT_API_BASE.to_string();
        }
        if config.request_timeout_secs == Some(0) {
            config.request_timeout_secs = None;
        }

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            api_base: "https://github.example.com/api/v3".to_string(),
            user_agent: "hubpeek-test".to_string(),
            request_timeout_secs: Some(15),
            dark_mode: true,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config.api_base, deserialized.api_base);
        assert_eq!(config.user_agent, deserialized.user_agent);
        assert_eq!(deserialized.request_timeout_secs, Some(15));
        assert!(deserialized.dark_mode);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = AppConfig::parse("dark_mode = true\n").unwrap();
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.user_agent.starts_with("hubpeek/"));
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_blank_base_and_zero_timeout_normalised() {
        let config = AppConfig::parse("api_base = \"  \"\nrequest_timeout_secs = 0\n").unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(AppConfig::parse("dark_mode = \"maybe\"").is_err());
    }
}
