//! Cursor-based tokenizer for two-way SQL
//!
//! Splits a SQL template into plain SQL text, block comments and line
//! comments. Comment markers inside single-quoted literals are ignored.
//! After a variable comment the analyzer calls
//! [`SqlTokenizer::skip_test_value`] to consume the literal that makes the
//! template runnable in a plain SQL client.

use crate::error::{TwoWaySqlError, TwoWaySqlResult};

/// A token of a two-way SQL template, borrowing from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlToken<'a> {
    /// Plain SQL text (may contain string literals and newlines)
    Sql(&'a str),
    /// Content between `/*` and `*/`
    BlockComment(&'a str),
    /// Content after `--` up to (excluding) the line break
    LineComment(&'a str),
}

/// Tokenizer over a two-way SQL template
#[derive(Debug, Clone)]
pub struct SqlTokenizer<'a> {
    sql: &'a str,
    position: usize,
    line: usize,
}

impl<'a> SqlTokenizer<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            sql,
            position: 0,
            line: 1,
        }
    }

    /// Current byte offset into the source
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line number of the current position
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next token, or `None` at the end of the source
    pub fn next_token(&mut self) -> TwoWaySqlResult<Option<SqlToken<'a>>> {
        let rest = &self.sql[self.position..];
        if rest.is_empty() {
            return Ok(None);
        }

        if let Some(body) = rest.strip_prefix("/*") {
            let Some(end) = body.find("*/") else {
                return Err(TwoWaySqlError::UnclosedBlockComment { line: self.line() });
            };
            self.advance(2 + end + 2);
            return Ok(Some(SqlToken::BlockComment(&body[..end])));
        }

        if let Some(body) = rest.strip_prefix("--") {
            let end = body.find('\n').unwrap_or(body.len());
            self.advance(2 + end);
            return Ok(Some(SqlToken::LineComment(&body[..end])));
        }

        let end = scan_plain_sql(rest);
        self.advance(end);
        Ok(Some(SqlToken::Sql(&rest[..end])))
    }

    /// Consume the test value following a variable comment
    ///
    /// A test value is a quoted literal, a parenthesized list, or a run of
    /// characters up to whitespace, `,`, `(`, `)`, `;` or a comment start.
    /// Returns the consumed text (possibly empty).
    pub fn skip_test_value(&mut self) -> &'a str {
        let rest = &self.sql[self.position..];
        let bytes = rest.as_bytes();

        let end = match bytes.first() {
            None => 0,
            Some(b'\'') => quoted_literal_end(bytes, 0),
            Some(b'(') => parenthesized_end(bytes),
            Some(_) => {
                let mut i = 0;
                while i < bytes.len() {
                    let b = bytes[i];
                    if b.is_ascii_whitespace() || matches!(b, b',' | b'(' | b')' | b';') {
                        break;
                    }
                    if starts_comment(bytes, i) {
                        break;
                    }
                    i += 1;
                }
                i
            }
        };

        self.advance(end);
        &rest[..end]
    }

    /// Move past `len` bytes, counting the line breaks consumed
    fn advance(&mut self, len: usize) {
        let consumed = &self.sql.as_bytes()[self.position..self.position + len];
        self.line += consumed.iter().filter(|b| **b == b'\n').count();
        self.position += len;
    }
}

fn starts_comment(bytes: &[u8], i: usize) -> bool {
    i + 1 < bytes.len()
        && ((bytes[i] == b'/' && bytes[i + 1] == b'*') || (bytes[i] == b'-' && bytes[i + 1] == b'-'))
}

/// Length of the plain SQL run at the start of `rest`
fn scan_plain_sql(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut in_literal = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_literal {
            // a doubled '' closes and reopens, which is the escape
            if b == b'\'' {
                in_literal = false;
            }
        } else if b == b'\'' {
            in_literal = true;
        } else if starts_comment(bytes, i) {
            break;
        }
        i += 1;
    }
    i
}

/// End offset (exclusive) of a quoted literal starting at `start`
fn quoted_literal_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// End offset (exclusive) of a parenthesized list starting at offset 0
fn parenthesized_end(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                i = quoted_literal_end(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}
