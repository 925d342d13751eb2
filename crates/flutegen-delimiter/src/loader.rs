//! Bulk loading of delimiter-separated data files

use crate::column_handler::{ColumnSetupContext, ListedColumnHandler};
use crate::error::{DelimiterDataError, DelimiterDataResult, SinkError};
use crate::first_line::FirstLineAnalyzer;
use crate::line_filter::LineDirectFilter;
use crate::reader::RecordReader;
use crate::record::{DataRecord, TableMeta};
use flutegen_core::{ConvertValueMap, DelimiterDataConfig, LINE_CONVERT_KEY};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Receives assembled records, typically a database writer
pub trait RecordSink {
    fn write(&mut self, record: DataRecord) -> Result<(), SinkError>;
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<DataRecord>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for VecSink {
    fn write(&mut self, record: DataRecord) -> Result<(), SinkError> {
        self.records.push(record);
        Ok(())
    }
}

/// A row skipped because its value count differs from the column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub line_number: usize,
    pub expected_columns: usize,
    pub actual_values: usize,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: expected {} values but found {}",
            self.line_number, self.expected_columns, self.actual_values
        )
    }
}

/// Outcome of loading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub file_name: String,
    pub table_name: String,
    pub columns: Vec<String>,
    pub loaded_count: usize,
    pub warnings: Vec<LoadWarning>,
}

/// Loads data files according to a [`DelimiterDataConfig`]
#[derive(Debug)]
pub struct DelimiterDataLoader<'c> {
    config: &'c DelimiterDataConfig,
    handler: ListedColumnHandler<'c>,
}

impl<'c> DelimiterDataLoader<'c> {
    pub fn new(config: &'c DelimiterDataConfig) -> Self {
        Self {
            config,
            handler: ListedColumnHandler::from_config(config),
        }
    }

    pub fn with_column_handler(mut self, handler: ListedColumnHandler<'c>) -> Self {
        self.handler = handler;
        self
    }

    /// Delimiter for a file: configured, else `.tsv` tab or `.csv` comma
    pub fn resolve_delimiter(&self, path: &Path) -> DelimiterDataResult<String> {
        if let Some(delimiter) = &self.config.delimiter {
            return Ok(delimiter.clone());
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("tsv") => Ok("\t".to_string()),
            Some("csv") => Ok(",".to_string()),
            _ => Err(DelimiterDataError::UnknownDelimiter {
                file_name: path.display().to_string(),
            }),
        }
    }

    /// Load one file into `sink`
    pub fn load_file(
        &self,
        path: &Path,
        table: &TableMeta,
        sink: &mut dyn RecordSink,
    ) -> DelimiterDataResult<LoadResult> {
        let delimiter = self.resolve_delimiter(path)?;
        let file_name = path.display().to_string();
        let file = File::open(path).map_err(|source| DelimiterDataError::Io {
            file_name: file_name.clone(),
            source,
        })?;
        let data_directory = path.parent().unwrap_or_else(|| Path::new("."));
        self.load_reader(
            BufReader::new(file),
            &file_name,
            data_directory,
            &delimiter,
            table,
            sink,
        )
    }

    /// Load from any buffered reader
    pub fn load_reader<R: BufRead>(
        &self,
        reader: R,
        file_name: &str,
        data_directory: &Path,
        delimiter: &str,
        table: &TableMeta,
        sink: &mut dyn RecordSink,
    ) -> DelimiterDataResult<LoadResult> {
        debug!(file = file_name, table = table.name(), "loading delimiter data");

        let convert_values = self.config.convert_values_for(table.name());
        let filter = LineDirectFilter::new(convert_values.cloned());
        let mut reader = RecordReader::new(reader, delimiter, file_name).with_filter(&filter);

        let header = reader.read_header()?.unwrap_or_default();
        let mut columns = FirstLineAnalyzer::new(delimiter)
            .analyze(&header)
            .into_column_names();
        if header.trim().is_empty() {
            columns.clear();
        }
        let header_count = columns.len();

        let default_values = self.config.default_values_for(table.name());
        let ctx = ColumnSetupContext {
            file_name,
            data_directory,
            table,
            default_values,
        };
        self.handler.setup_column_names(&mut columns, &ctx)?;

        let mut loaded_count = 0;
        let mut warnings = Vec::new();
        while let Some(record) = reader.next_record()? {
            if record.values.len() != header_count {
                let warning = LoadWarning {
                    line_number: record.line_number,
                    expected_columns: header_count,
                    actual_values: record.values.len(),
                };
                warn!(file = file_name, "skipped row, {warning}");
                warnings.push(warning);
                continue;
            }

            let mut data = DataRecord::new();
            for (column, value) in columns.iter().zip(record.values) {
                let value = convert_value(convert_values, column, value);
                data.push(column.clone(), (!value.is_empty()).then_some(value));
            }
            for column in &columns[header_count..] {
                let value = default_values
                    .and_then(|defaults| lookup_ignore_case(defaults, column))
                    .filter(|v| !v.is_empty())
                    .cloned();
                data.push(column.clone(), value);
            }

            sink.write(data).map_err(|source| DelimiterDataError::Sink {
                file_name: file_name.to_string(),
                line_number: record.line_number,
                source,
            })?;
            loaded_count += 1;
        }

        info!(
            file = file_name,
            table = table.name(),
            loaded = loaded_count,
            skipped = warnings.len(),
            "delimiter data loaded"
        );
        Ok(LoadResult {
            file_name: file_name.to_string(),
            table_name: table.name().to_string(),
            columns,
            loaded_count,
            warnings,
        })
    }
}

/// Whole-value conversion configured under the column's name
fn convert_value(convert_values: Option<&ConvertValueMap>, column: &str, value: String) -> String {
    convert_values
        .filter(|_| column != LINE_CONVERT_KEY)
        .and_then(|map| lookup_ignore_case(map, column))
        .and_then(|pairs| pairs.get(&value))
        .cloned()
        .unwrap_or(value)
}

fn lookup_ignore_case<'m, V>(map: &'m indexmap::IndexMap<String, V>, key: &str) -> Option<&'m V> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

#[cfg(test)]
#[path = "loader/loader_tests.rs"]
mod loader_tests;
