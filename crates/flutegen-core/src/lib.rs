//! flutegen-core - Core types, advisory messages, and configuration
//!
//! This crate provides the foundational types shared by the flutegen engines:
//! - [`AdvisoryMessage`] for the multi-section, console-oriented failure reports
//! - [`FluteConfig`] and its sections for toolchain configuration
//! - [`ConfigError`] for configuration failures
//! - [`LogLevel`] for the console log threshold

mod config;
mod error;
mod message;

pub use config::{
    ConvertValueMap, DefaultValueMap, DelimiterDataConfig, FluteConfig, LINE_CONVERT_KEY,
    OutsideSqlConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use message::{AdvisoryMessage, AdvisoryMessageBuilder};

/// Log levels for console output
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Parse a level name, case-insensitively (`"info"`, `"WARN"`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }

    /// Level stored as its discriminant; unknown values mean `Off`
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s).ok_or_else(|| ConfigError::InvalidValue {
            key: "log_level".to_string(),
            value: s.to_string(),
        })
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        };
        f.pad(name)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AdvisoryMessage, ConfigError, ConfigResult, DelimiterDataConfig, FluteConfig, LogLevel,
        OutsideSqlConfig,
    };
}
