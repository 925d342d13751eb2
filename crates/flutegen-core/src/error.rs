//! Error types for flutegen configuration

use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("configuration parse error: {0}")]
    Parse(String),

    /// A setting holds a value outside its accepted domain
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// A setting is present but empty where a value is required
    #[error("empty value for {0}")]
    EmptyValue(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
