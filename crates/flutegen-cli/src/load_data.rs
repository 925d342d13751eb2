//! Load command for delimited data files

use anyhow::{Context, Result};
use flutegen_core::FluteConfig;
use flutegen_delimiter::{
    DataRecord, DelimiterDataError, DelimiterDataLoader, FirstLineAnalyzer, LoadResult,
    RecordReader, RecordSink, SinkError, TableMeta,
};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Command-line overrides for one load
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    pub table: Option<String>,
    pub table_columns: Option<Vec<String>>,
    pub delimiter: Option<String>,
}

/// Writes each record as one JSON object per line
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write(&mut self, record: DataRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Run the load-data command, printing records to stdout
pub fn run(config: FluteConfig, file: &Path, options: LoadOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock());

    let result = load(config, file, options, &mut sink)?;
    sink.into_inner().flush()?;

    eprintln!(
        "✓ Loaded {} record(s) into {} ({} column(s))",
        result.loaded_count,
        result.table_name,
        result.columns.len()
    );
    for warning in &result.warnings {
        eprintln!("  skipped {warning}");
    }
    Ok(())
}

/// Load `file` into `sink` with the command-line overrides applied
pub fn load(
    mut config: FluteConfig,
    file: &Path,
    options: LoadOptions,
    sink: &mut dyn RecordSink,
) -> Result<LoadResult> {
    if let Some(delimiter) = options.delimiter {
        config.delimiter_data.delimiter = Some(delimiter);
        config.delimiter_data.validate()?;
    }
    let table_name = match options.table {
        Some(table) => table,
        None => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a table name from {}", file.display()))?,
    };

    let loader = DelimiterDataLoader::new(&config.delimiter_data);
    let table = match options.table_columns {
        Some(columns) => TableMeta::from_column_names(&table_name, columns),
        None => header_table(&loader, &config, file, &table_name).map_err(advisory_error)?,
    };

    loader
        .load_file(file, &table, sink)
        .map_err(advisory_error)
}

/// Table made of the header columns and the configured default columns
fn header_table(
    loader: &DelimiterDataLoader<'_>,
    config: &FluteConfig,
    file: &Path,
    table_name: &str,
) -> Result<TableMeta, DelimiterDataError> {
    let delimiter = loader.resolve_delimiter(file)?;
    let file_name = file.display().to_string();
    let reader = File::open(file).map_err(|source| DelimiterDataError::Io {
        file_name: file_name.clone(),
        source,
    })?;

    let header = RecordReader::new(BufReader::new(reader), &delimiter, file_name)
        .read_header()?
        .unwrap_or_default();
    let mut columns = FirstLineAnalyzer::new(delimiter)
        .analyze(&header)
        .into_column_names();
    if let Some(defaults) = config.delimiter_data.default_values_for(table_name) {
        columns.extend(defaults.keys().cloned());
    }
    Ok(TableMeta::from_column_names(table_name, columns))
}

fn advisory_error(err: DelimiterDataError) -> anyhow::Error {
    anyhow::anyhow!("{}", err.to_advisory())
}
