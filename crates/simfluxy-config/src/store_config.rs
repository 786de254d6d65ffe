//! Store configuration
//!
//! Configuration loaded from `.simfluxy.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Store configuration loaded from `.simfluxy.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name used as prefix in log output (e.g., "cart", "session")
    #[serde(default = "default_name")]
    pub name: String,

    /// Log the type of every dispatched action at debug level
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,

    /// Log the full state after every dispatch at trace level
    #[serde(default)]
    pub log_state: bool,
}

fn default_name() -> String {
    "simfluxy".to_string()
}

fn default_log_actions() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_actions: default_log_actions(),
            log_state: false,
        }
    }
}

impl StoreConfig {
    /// Load config from CWD first, then the user config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded store config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default store config");
        Self::default()
    }

    /// Parse a config from TOML source
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid simfluxy config")
    }

    /// Same config under a different log name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.name, "simfluxy");
        assert!(config.log_actions);
        assert!(!config.log_state);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            name = "cart"
            log_actions = false
            log_state = true
        "#;
        let config = StoreConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.name, "cart");
        assert!(!config.log_actions);
        assert!(config.log_state);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = StoreConfig::from_toml_str(r#"name = "session""#).unwrap();
        assert_eq!(config.name, "session");
        // Other fields should use defaults
        assert!(config.log_actions);
        assert!(!config.log_state);
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        let err = StoreConfig::from_toml_str("log_actions = \"yes\"").unwrap_err();
        assert!(format!("{:#}", err).contains("invalid simfluxy config"));
    }

    #[test]
    fn test_load_always_yields_a_config() {
        // Falls back to defaults when no file is present or parsing fails
        let config = StoreConfig::load();
        assert!(!config.name.is_empty());
    }

    #[test]
    fn test_named_overrides_only_name() {
        let config = StoreConfig::default().named("todo");
        assert_eq!(config.name, "todo");
        assert!(config.log_actions);
    }
}
