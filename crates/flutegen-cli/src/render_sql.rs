//! Render command for two-way SQL files

use anyhow::{Context, Result};
use flutegen_twoway::RenderedSql;
use serde_json::Value;
use std::path::Path;

/// Run the render-sql command
pub fn run(file: &Path, params: Option<&str>) -> Result<()> {
    let sql = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read SQL file: {}", file.display()))?;

    let rendered = render(&sql, params)?;

    println!("{}", rendered.sql.trim());
    println!("-- binds: {}", serde_json::to_string(&rendered.bind_values)?);
    Ok(())
}

/// Parse `sql` and render it against the JSON parameter bean
pub fn render(sql: &str, params: Option<&str>) -> Result<RenderedSql> {
    let params: Value = match params {
        Some(json) => serde_json::from_str(json).context("Parameters must be a JSON value")?,
        None => Value::Object(serde_json::Map::new()),
    };

    let template = flutegen_twoway::parse(sql).map_err(|e| advisory_error(e.to_advisory(sql)))?;
    template
        .render(&params)
        .map_err(|e| advisory_error(e.to_advisory(sql)))
}

fn advisory_error(advisory: flutegen_core::AdvisoryMessage) -> anyhow::Error {
    anyhow::anyhow!("{advisory}")
}
