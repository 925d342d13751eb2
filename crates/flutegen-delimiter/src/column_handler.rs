//! Effective column list of a data file
//!
//! Starts from the header columns, optionally cross-checks them against the
//! table, then appends default-valued columns the header does not list.

use crate::error::{DelimiterDataError, DelimiterDataResult};
use crate::record::TableMeta;
use flutegen_core::{DefaultValueMap, DelimiterDataConfig};
use std::path::Path;

/// What the column handler knows about the file being loaded
#[derive(Debug, Clone, Copy)]
pub struct ColumnSetupContext<'a> {
    pub file_name: &'a str,
    pub data_directory: &'a Path,
    pub table: &'a TableMeta,
    pub default_values: Option<&'a DefaultValueMap>,
}

type CheckPredicate<'h> = Box<dyn Fn(&Path) -> bool + Send + Sync + 'h>;
type ColumnChecker<'h> =
    Box<dyn Fn(&[String], &ColumnSetupContext<'_>) -> DelimiterDataResult<()> + Send + Sync + 'h>;

/// Builds the column list for one data file
pub struct ListedColumnHandler<'h> {
    needs_check: CheckPredicate<'h>,
    checker: ColumnChecker<'h>,
}

impl Default for ListedColumnHandler<'_> {
    fn default() -> Self {
        Self {
            needs_check: Box::new(|_: &Path| true),
            checker: Box::new(check_columns_exist),
        }
    }
}

impl std::fmt::Debug for ListedColumnHandler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListedColumnHandler").finish_non_exhaustive()
    }
}

impl<'h> ListedColumnHandler<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check column definitions when the configuration asks for it
    pub fn from_config(config: &DelimiterDataConfig) -> Self {
        let enabled = config.check_column_definition;
        Self::new().with_check_predicate(move |_| enabled)
    }

    /// Decide per data directory whether to cross-check columns
    pub fn with_check_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'h,
    {
        self.needs_check = Box::new(predicate);
        self
    }

    /// Replace the default cross-check (every header column exists)
    pub fn with_column_checker<F>(mut self, checker: F) -> Self
    where
        F: Fn(&[String], &ColumnSetupContext<'_>) -> DelimiterDataResult<()> + Send + Sync + 'h,
    {
        self.checker = Box::new(checker);
        self
    }

    /// Complete `columns` in place
    ///
    /// Appends, in default-value order, each default-valued column that the
    /// header lacks and the table has. Default columns unknown to the table
    /// are dropped.
    pub fn setup_column_names(
        &self,
        columns: &mut Vec<String>,
        ctx: &ColumnSetupContext<'_>,
    ) -> DelimiterDataResult<()> {
        if columns.is_empty() {
            return Err(DelimiterDataError::ColumnDefinitionNotFound {
                file_name: ctx.file_name.to_string(),
                table_name: ctx.table.name().to_string(),
            });
        }

        if (self.needs_check)(ctx.data_directory) {
            (self.checker)(columns.as_slice(), ctx)?;
        }

        let Some(default_values) = ctx.default_values else {
            return Ok(());
        };
        for column in default_values.keys() {
            let listed = columns.iter().any(|c| c.eq_ignore_ascii_case(column));
            if !listed && ctx.table.has_column(column) {
                columns.push(column.clone());
            }
        }
        Ok(())
    }
}

/// Every header column must exist in the table
pub fn check_columns_exist(
    columns: &[String],
    ctx: &ColumnSetupContext<'_>,
) -> DelimiterDataResult<()> {
    let unknown_columns: Vec<String> = columns
        .iter()
        .filter(|c| !ctx.table.has_column(c))
        .cloned()
        .collect();
    if unknown_columns.is_empty() {
        return Ok(());
    }
    Err(DelimiterDataError::ColumnDefinitionMismatch {
        file_name: ctx.file_name.to_string(),
        table_name: ctx.table.name().to_string(),
        unknown_columns,
    })
}

#[cfg(test)]
#[path = "column_handler/column_handler_tests.rs"]
mod column_handler_tests;
