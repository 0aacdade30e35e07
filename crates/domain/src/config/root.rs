use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::blocking::BlockingConfig;
use super::directory::DirectoryConfig;
use super::errors::ConfigError;
use super::filtering::FilteringConfig;
use super::logging::LoggingConfig;
use super::screening::ScreeningConfig;

/// Main configuration structure for callguard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Filtering run budget and enabled sources
    #[serde(default)]
    pub filtering: FilteringConfig,

    /// Local block list
    #[serde(default)]
    pub blocking: BlockingConfig,

    /// Contacts served by the in-memory directory
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Default dialer and its screening component
    #[serde(default)]
    pub screening: ScreeningConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. callguard.toml in current directory
    /// 3. /etc/callguard/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("callguard.toml").exists() {
            Self::from_file("callguard.toml")?
        } else if std::path::Path::new("/etc/callguard/config.toml").exists() {
            Self::from_file("/etc/callguard/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.filtering.timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.json_logs {
            self.logging.json = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filtering.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Filtering timeout cannot be 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for contact in &self.directory.contacts {
            if contact.number.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Contact with an empty number".to_string(),
                ));
            }
            if !seen.insert(contact.number.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate contact number '{}'",
                    contact.number
                )));
            }
        }

        if let Some(handler) = &self.screening.default_handler {
            if handler.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Default handler package cannot be empty".to_string(),
                ));
            }
        }

        for component in &self.screening.components {
            if component.class_name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Screening component for '{}' has no class name",
                    component.package
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("callguard.toml").exists() {
            Some("callguard.toml".to_string())
        } else if std::path::Path::new("/etc/callguard/config.toml").exists() {
            Some("/etc/callguard/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}
