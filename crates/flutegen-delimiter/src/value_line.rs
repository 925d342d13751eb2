//! Data line tokenizing
//!
//! A quoted value may contain the delimiter and may continue on the next
//! physical line. The analyzer splits on the literal delimiter and glues
//! tokens back together until a token closes the open quote:
//!
//! | token (nothing pending) | action |
//! |-------------------------|--------|
//! | `"abc` (front quote only) | start accumulating |
//! | `abc"` (rear quote only)  | start accumulating |
//! | `abc` (no quotes)         | emit as is |
//! | `"abc"`, `""`             | emit unquoted, `""` collapsed to `"` |
//!
//! A token ends with a quote when its run of trailing quotes has odd
//! length; an even run is escaped quotes. While accumulating, the first
//! token that ends with a quote closes the value. A line that ends while
//! accumulating yields [`ValueLineInfo::is_continue_next_line`].

use crate::first_line::split_literal;

const QUOTE: char = '"';

/// Field values of one logical record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLineInfo {
    values: Vec<String>,
    continue_next_line: bool,
}

impl ValueLineInfo {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The last value is an open quote; join the next physical line and
    /// analyze again
    pub fn is_continue_next_line(&self) -> bool {
        self.continue_next_line
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

/// Tokenizes data lines for one delimiter
#[derive(Debug, Clone)]
pub struct ValueLineAnalyzer {
    delimiter: String,
}

impl ValueLineAnalyzer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Tokenize one line; never fails
    pub fn analyze(&self, line: &str) -> ValueLineInfo {
        let tokens: Vec<&str> = split_literal(line, &self.delimiter).collect();
        let last = tokens.len().saturating_sub(1);
        let mut values = Vec::with_capacity(tokens.len());
        let mut pending: Option<String> = None;
        let mut continue_next_line = false;

        for (i, token) in tokens.iter().enumerate() {
            let is_last = i == last;

            if let Some(pre) = pending.take() {
                let joined = format!("{pre}{}{token}", self.delimiter);
                if ends_with_quote(token) {
                    values.push(unquote(&joined));
                } else if is_last {
                    values.push(joined);
                    continue_next_line = true;
                } else {
                    pending = Some(joined);
                }
                continue;
            }

            let front = token.starts_with(QUOTE);
            let rear = ends_with_quote(&token[usize::from(front)..]);
            match (front, rear) {
                (true, false) | (false, true) => {
                    if is_last {
                        values.push(token.to_string());
                        continue_next_line = true;
                    } else {
                        pending = Some(token.to_string());
                    }
                }
                (false, false) => values.push(token.to_string()),
                (true, true) => values.push(unquote(token)),
            }
        }

        ValueLineInfo {
            values,
            continue_next_line,
        }
    }
}

/// Odd number of trailing quote characters
fn ends_with_quote(token: &str) -> bool {
    let trailing = token.chars().rev().take_while(|c| *c == QUOTE).count();
    trailing % 2 == 1
}

/// Strip one surrounding quote on each side and collapse `""` to `"`
fn unquote(value: &str) -> String {
    let value = value.strip_prefix(QUOTE).unwrap_or(value);
    let value = value.strip_suffix(QUOTE).unwrap_or(value);
    value.replace("\"\"", "\"")
}
