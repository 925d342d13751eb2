//! Check command for outside-SQL files

use anyhow::{Context, Result};
use flutegen_core::FluteConfig;
use flutegen_outsidesql::{OutsideSqlChecker, ValidationSession};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Totals of one check-sql run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub titled: usize,
    pub if_comments: usize,
}

/// Run the check-sql command
///
/// Every file is checked against one session, so titles and descriptions
/// must be unique across all of `paths`. The first failure aborts the run.
pub fn run(config: &FluteConfig, paths: &[PathBuf]) -> Result<CheckSummary> {
    let files = collect_sql_files(paths)?;
    println!("Checking {} outside-SQL file(s)", files.len());

    let summary = check_files(config, &files)?;

    println!("✓ Files: {}", summary.files);
    println!("✓ Titled: {}", summary.titled);
    println!("✓ IF comments: {}", summary.if_comments);
    println!("\nAll outside-SQL files are valid!");
    Ok(summary)
}

/// Check `files` in order with a single session
pub fn check_files(config: &FluteConfig, files: &[PathBuf]) -> Result<CheckSummary> {
    let checker = OutsideSqlChecker::from_config(config.outside_sql);
    let mut session = ValidationSession::new();
    let mut summary = CheckSummary::default();

    for file in files {
        let sql = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read SQL file: {}", file.display()))?;
        let file_name = file.display().to_string();

        let checked = checker.check(&mut session, &file_name, &sql)?;

        debug!(file = %file_name, "checked");
        summary.files += 1;
        summary.titled += usize::from(checked.title.is_some());
        summary.if_comments += checked.template.if_expressions().len();
    }
    Ok(summary)
}

/// Files given directly, plus every `*.sql` below given directories, sorted
/// per directory
pub fn collect_sql_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("SQL path not found: {}", path.display());
        }
    }
    Ok(files)
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_dir(&path, files)?;
        } else if is_sql_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}
