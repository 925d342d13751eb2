//! Header line analysis

const QUOTE: char = '"';

/// Column names read from the header line of a data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstLineInfo {
    column_names: Vec<String>,
    quotated: bool,
}

impl FirstLineInfo {
    /// Column names in header order, case preserved
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Column names in header order, lower-cased
    pub fn column_names_lower(&self) -> Vec<String> {
        self.column_names.iter().map(|c| c.to_lowercase()).collect()
    }

    /// Whether the first header field was wrapped in quotes
    pub fn is_quotated(&self) -> bool {
        self.quotated
    }

    pub fn into_column_names(self) -> Vec<String> {
        self.column_names
    }
}

/// Splits a header line into column names
///
/// Headers are single-line: quotes around a name are stripped, but a
/// delimiter inside quotes is not protected.
#[derive(Debug, Clone)]
pub struct FirstLineAnalyzer {
    delimiter: String,
}

impl FirstLineAnalyzer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn analyze(&self, line: &str) -> FirstLineInfo {
        let mut quotated = false;
        let column_names = split_literal(line, &self.delimiter)
            .enumerate()
            .map(|(i, token)| match strip_quotes(token) {
                Some(inner) => {
                    if i == 0 {
                        quotated = true;
                    }
                    inner.to_string()
                }
                None => token.to_string(),
            })
            .collect();
        FirstLineInfo {
            column_names,
            quotated,
        }
    }
}

/// `"name"` to `name`; `None` unless both ends are quotes
fn strip_quotes(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with(QUOTE) && token.ends_with(QUOTE) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Split on a literal delimiter; an empty delimiter yields the whole line
pub(crate) fn split_literal<'l>(
    line: &'l str,
    delimiter: &'l str,
) -> Box<dyn Iterator<Item = &'l str> + 'l> {
    if delimiter.is_empty() {
        Box::new(std::iter::once(line))
    } else {
        Box::new(line.split(delimiter))
    }
}
