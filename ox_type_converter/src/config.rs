use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::converters::ConverterKey;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON service configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML service configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings applied when a `ConversionService` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Register the built-in string/number/boolean converters.
    pub register_builtins: bool,
    /// Keys of built-in converters to leave out.
    pub disabled_builtins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            register_builtins: true,
            disabled_builtins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Whether the built-in converter registered under `key` should be installed.
    pub fn builtin_enabled(&self, key: &ConverterKey) -> bool {
        self.register_builtins && !self.disabled_builtins.iter().any(|k| k == key.as_str())
    }
}
