//! Error types for delimiter data loading

use flutegen_core::AdvisoryMessage;
use thiserror::Error;

/// Result type alias for delimiter data operations
pub type DelimiterDataResult<T> = Result<T, DelimiterDataError>;

/// Error raised by a [`crate::RecordSink`]
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DelimiterDataError {
    #[error("failed to read {file_name}: {source}")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The header line yielded no columns
    #[error("column definition not found: file={file_name}, table={table_name}")]
    ColumnDefinitionNotFound {
        file_name: String,
        table_name: String,
    },

    /// Header columns that the table does not have
    #[error("columns {unknown_columns:?} not found in table {table_name}: file={file_name}")]
    ColumnDefinitionMismatch {
        file_name: String,
        table_name: String,
        unknown_columns: Vec<String>,
    },

    /// End of file inside a quoted value
    #[error("quoted value starting at line {line_number} is not closed: file={file_name}")]
    UnterminatedQuotedValue {
        file_name: String,
        line_number: usize,
    },

    /// No delimiter configured and none implied by the file extension
    #[error("cannot determine the delimiter of {file_name}")]
    UnknownDelimiter { file_name: String },

    /// The record sink rejected a record
    #[error("failed to write record from {file_name} line {line_number}: {source}")]
    Sink {
        file_name: String,
        line_number: usize,
        #[source]
        source: SinkError,
    },
}

impl DelimiterDataError {
    /// Build the console advisory for this failure
    pub fn to_advisory(&self) -> AdvisoryMessage {
        match self {
            DelimiterDataError::Io { file_name, source } => {
                AdvisoryMessage::builder("Failed to read the data file.")
                    .entry("Data File", file_name.clone())
                    .entry("Cause", source.to_string())
                    .build()
            }
            DelimiterDataError::ColumnDefinitionNotFound {
                file_name,
                table_name,
            } => AdvisoryMessage::builder("The column definition on the first line was not found.")
                .advice("Make sure the first line of the data file lists the columns.")
                .advice("For example:")
                .advice("  MEMBER_ID\tMEMBER_NAME\tBIRTHDATE")
                .entry("Data File", file_name.clone())
                .entry("Table", table_name.clone())
                .build(),
            DelimiterDataError::ColumnDefinitionMismatch {
                file_name,
                table_name,
                unknown_columns,
            } => {
                let mut builder =
                    AdvisoryMessage::builder("The column in the data file was not found in the table.")
                        .advice("Make sure the column names on the first line.")
                        .entry("Data File", file_name.clone())
                        .entry("Table", table_name.clone())
                        .item("Unknown Columns");
                for column in unknown_columns {
                    builder = builder.element(column.clone());
                }
                builder.build()
            }
            DelimiterDataError::UnterminatedQuotedValue {
                file_name,
                line_number,
            } => AdvisoryMessage::builder("The quoted value was not closed before the end of the file.")
                .advice("Close the double quote of the value, and escape quotes inside it as \"\".")
                .entry("Data File", file_name.clone())
                .entry("Line Number", line_number.to_string())
                .build(),
            DelimiterDataError::UnknownDelimiter { file_name } => {
                AdvisoryMessage::builder("The delimiter of the data file is unknown.")
                    .advice("Use the .tsv or .csv extension, or configure delimiter_data.delimiter.")
                    .entry("Data File", file_name.clone())
                    .build()
            }
            DelimiterDataError::Sink {
                file_name,
                line_number,
                source,
            } => AdvisoryMessage::builder("Failed to write the record.")
                .entry("Data File", file_name.clone())
                .entry("Line Number", line_number.to_string())
                .entry("Cause", source.to_string())
                .build(),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
