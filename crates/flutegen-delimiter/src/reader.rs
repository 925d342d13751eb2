//! Physical-to-logical line reading
//!
//! Reads the header, then data records. A record whose last value is an
//! open quote continues on the next physical line: the lines are joined
//! with the delimiter and analyzed again.

use crate::error::{DelimiterDataError, DelimiterDataResult};
use crate::line_filter::LineDirectFilter;
use crate::value_line::ValueLineAnalyzer;
use std::io::BufRead;

const BOM: char = '\u{feff}';

/// Field values of one logical record and the line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRecord {
    pub line_number: usize,
    pub values: Vec<String>,
}

/// Reads logical records from a delimited data stream
pub struct RecordReader<'f, R> {
    reader: R,
    analyzer: ValueLineAnalyzer,
    filter: Option<&'f LineDirectFilter>,
    file_name: String,
    line_number: usize,
}

impl<'f, R: BufRead> RecordReader<'f, R> {
    pub fn new(reader: R, delimiter: &str, file_name: impl Into<String>) -> Self {
        Self {
            reader,
            analyzer: ValueLineAnalyzer::new(delimiter),
            filter: None,
            file_name: file_name.into(),
            line_number: 0,
        }
    }

    /// Apply `$$LINE$$` substitutions to every data line
    pub fn with_filter(mut self, filter: &'f LineDirectFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Physical lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The first non-blank line, without a leading byte-order mark
    pub fn read_header(&mut self) -> DelimiterDataResult<Option<String>> {
        while let Some(line) = self.read_physical_line()? {
            let line = line.strip_prefix(BOM).map(str::to_string).unwrap_or(line);
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// The next logical record, skipping empty lines
    ///
    /// Whitespace-only lines are data: in a single-column file they carry a
    /// blank value.
    pub fn next_record(&mut self) -> DelimiterDataResult<Option<LogicalRecord>> {
        let (line_number, mut text) = loop {
            let Some(line) = self.read_data_line()? else {
                return Ok(None);
            };
            if !line.is_empty() {
                break (self.line_number, line);
            }
        };

        loop {
            let info = self.analyzer.analyze(&text);
            if !info.is_continue_next_line() {
                return Ok(Some(LogicalRecord {
                    line_number,
                    values: info.into_values(),
                }));
            }
            let Some(next) = self.read_data_line()? else {
                return Err(DelimiterDataError::UnterminatedQuotedValue {
                    file_name: self.file_name.clone(),
                    line_number,
                });
            };
            text.push_str(self.analyzer.delimiter());
            text.push_str(&next);
        }
    }

    fn read_data_line(&mut self) -> DelimiterDataResult<Option<String>> {
        let line = self.read_physical_line()?;
        Ok(match (line, self.filter) {
            (Some(line), Some(filter)) => Some(filter.filter(&line).into_owned()),
            (line, _) => line,
        })
    }

    fn read_physical_line(&mut self) -> DelimiterDataResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|source| DelimiterDataError::Io {
                file_name: self.file_name.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for RecordReader<'_, R> {
    type Item = DelimiterDataResult<LogicalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
