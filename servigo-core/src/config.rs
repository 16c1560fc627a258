//! Configuration management

use crate::error::{ErrorContext, ServigoError, ServigoResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServigoConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub logging: LoggingConfig,
}

/// API endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base endpoint origin for all API requests
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Session store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the persistent session document
    pub session_file: String,
}

impl Default for ServigoConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://127.0.0.1:5000".to_string(),
                timeout_seconds: 30,
            },
            storage: StorageSettings {
                session_file: "~/.servigo/session.json".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl ServigoConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ServigoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ServigoError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ServigoConfig = toml::from_str(&content).map_err(|e| ServigoError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ServigoResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ServigoError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| ServigoError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ServigoResult<()> {
        if self.api.base_url.is_empty() {
            return Err(ServigoError::Config {
                message: "API base_url must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.base_url to the backend origin"),
            });
        }

        if self.api.timeout_seconds == 0 {
            return Err(ServigoError::Config {
                message: "API timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.timeout_seconds to a positive value"),
            });
        }

        if self.storage.session_file.is_empty() {
            return Err(ServigoError::Config {
                message: "Storage session_file must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.session_file to a writable path"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServigoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = ServigoConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("servigo.toml");

        let config = ServigoConfig::default();
        config.save_to_file(&path).unwrap();

        let loaded = ServigoConfig::from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, config.api.base_url);
        assert_eq!(loaded.api.timeout_seconds, config.api.timeout_seconds);
        assert_eq!(loaded.storage.session_file, config.storage.session_file);
    }
}
