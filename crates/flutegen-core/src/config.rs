//! Toolchain configuration types

use crate::error::{ConfigError, ConfigResult};
use crate::LogLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the convert-value entry that applies to whole raw lines
pub const LINE_CONVERT_KEY: &str = "$$LINE$$";

/// Default values per column, in declaration order
pub type DefaultValueMap = IndexMap<String, String>;

/// Convert-value entries per key (`$$LINE$$` or a column), each an ordered
/// `from -> to` substitution list
pub type ConvertValueMap = IndexMap<String, IndexMap<String, String>>;

/// Top-level flutegen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluteConfig {
    /// Console log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Outside-SQL checking policy
    #[serde(default)]
    pub outside_sql: OutsideSqlConfig,

    /// Delimited data loading settings
    #[serde(default)]
    pub delimiter_data: DelimiterDataConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for FluteConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            outside_sql: OutsideSqlConfig::default(),
            delimiter_data: DelimiterDataConfig::default(),
        }
    }
}

impl FluteConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> ConfigResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parsed console log level
    pub fn log_level(&self) -> ConfigResult<LogLevel> {
        self.log_level.parse()
    }

    /// Validate settings that serde cannot check on its own
    pub fn validate(&self) -> ConfigResult<()> {
        self.log_level()?;
        self.delimiter_data.validate()
    }
}

/// Strictness switches for the outside-SQL checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsideSqlConfig {
    /// Parse every IF-comment expression
    #[serde(default = "default_true")]
    pub check_if_comment_expression: bool,

    /// Require a (non-placeholder) title in every SQL file
    #[serde(default)]
    pub required_title_check: bool,

    /// Require a (non-placeholder) description in every SQL file
    #[serde(default)]
    pub required_description_check: bool,

    /// Allow the same title in several files
    #[serde(default)]
    pub suppress_title_uniqueness: bool,

    /// Allow the same description in several files
    #[serde(default)]
    pub suppress_description_uniqueness: bool,
}

impl Default for OutsideSqlConfig {
    fn default() -> Self {
        Self {
            check_if_comment_expression: true,
            required_title_check: false,
            required_description_check: false,
            suppress_title_uniqueness: false,
            suppress_description_uniqueness: false,
        }
    }
}

/// Settings for loading delimiter-separated data files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterDataConfig {
    /// Field delimiter; inferred from the file extension when absent
    #[serde(default)]
    pub delimiter: Option<String>,

    /// Cross-check header columns against table metadata
    #[serde(default = "default_true")]
    pub check_column_definition: bool,

    /// Default values per table for columns missing from the header
    #[serde(default)]
    pub default_values: IndexMap<String, DefaultValueMap>,

    /// Convert-value maps per table
    #[serde(default)]
    pub convert_values: IndexMap<String, ConvertValueMap>,
}

impl Default for DelimiterDataConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            check_column_definition: true,
            default_values: IndexMap::new(),
            convert_values: IndexMap::new(),
        }
    }
}

impl DelimiterDataConfig {
    /// Default values configured for a table (case-insensitive table name)
    pub fn default_values_for(&self, table_name: &str) -> Option<&DefaultValueMap> {
        find_ignore_case(&self.default_values, table_name)
    }

    /// Convert-value map configured for a table (case-insensitive table name)
    pub fn convert_values_for(&self, table_name: &str) -> Option<&ConvertValueMap> {
        find_ignore_case(&self.convert_values, table_name)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(delimiter) = &self.delimiter {
            if delimiter.is_empty() {
                return Err(ConfigError::EmptyValue("delimiter_data.delimiter".to_string()));
            }
        }
        for (table, values) in &self.convert_values {
            for (key, pairs) in values {
                if pairs.keys().any(String::is_empty) {
                    return Err(ConfigError::InvalidValue {
                        key: format!("delimiter_data.convert_values.{table}.{key}"),
                        value: String::new(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn find_ignore_case<'a, V>(map: &'a IndexMap<String, V>, key: &str) -> Option<&'a V> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}


#[cfg(test)]
#[path = "config/config_parameterized_tests.rs"]
mod config_parameterized_tests;
