//! flutegen.toml loading and validation

use anyhow::{Context, Result};
use flutegen_core::FluteConfig;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "flutegen.toml";

/// The explicit path, else `./flutegen.toml` when it exists
pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.is_file().then_some(default)
    })
}

/// Load and validate the configuration; defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<FluteConfig> {
    match path {
        Some(path) => from_file(path),
        None => Ok(FluteConfig::default()),
    }
}

/// Load configuration from a file
pub fn from_file(path: impl AsRef<Path>) -> Result<FluteConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;

    from_str(&content).with_context(|| format!("Invalid configuration: {}", path.display()))
}

/// Parse and validate configuration from TOML text
pub fn from_str(content: &str) -> Result<FluteConfig> {
    let config: FluteConfig = toml::from_str(content).context("Failed to parse configuration")?;
    config.validate()?;
    Ok(config)
}

/// Check command implementation
pub fn check(path: Option<&Path>, config: &FluteConfig) {
    match path {
        Some(path) => println!("Checking configuration: {}", path.display()),
        None => println!("No {DEFAULT_CONFIG_FILE} found, checking defaults"),
    }

    let outside_sql = &config.outside_sql;
    let delimiter_data = &config.delimiter_data;
    println!("✓ Log level: {}", config.log_level);
    println!(
        "✓ Outside-SQL: if-comment check {}, title {}, description {}",
        on_off(outside_sql.check_if_comment_expression),
        requirement(
            outside_sql.required_title_check,
            outside_sql.suppress_title_uniqueness
        ),
        requirement(
            outside_sql.required_description_check,
            outside_sql.suppress_description_uniqueness
        ),
    );
    println!(
        "✓ Delimiter data: delimiter {}, column check {}",
        delimiter_data
            .delimiter
            .as_deref()
            .map(|d| format!("{d:?}"))
            .unwrap_or_else(|| "by extension".to_string()),
        on_off(delimiter_data.check_column_definition),
    );
    println!(
        "✓ Default values: {} table(s), convert values: {} table(s)",
        delimiter_data.default_values.len(),
        delimiter_data.convert_values.len()
    );
    println!("\nConfiguration is valid!");
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn requirement(required: bool, suppress_uniqueness: bool) -> &'static str {
    match (required, suppress_uniqueness) {
        (false, _) => "optional",
        (true, false) => "required and unique",
        (true, true) => "required",
    }
}
