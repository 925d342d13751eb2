//! Two-way SQL analyzer
//!
//! Builds a [`SqlTemplate`] node tree from the token stream. Directives are
//! recognized from block comments:
//!
//! | Comment | Node |
//! |---------|------|
//! | `/*pmb.name*/'x'` | [`Node::BindVariable`] |
//! | `/*$pmb.name*/x` | [`Node::EmbeddedVariable`] |
//! | `/*IF expr*/ ... -- ELSE ... /*END*/` | [`Node::If`] |
//! | `/*BEGIN*/ ... /*END*/` | [`Node::Begin`] |
//! | `/*FOR pmb.list*/ ... /*END*/` | [`Node::For`] |
//! | `/*NEXT 'sep'*/`, `/*FIRST*/`, `/*LAST*/`, `/*#current*/` | loop nodes |
//!
//! Any other comment is kept as plain SQL.

use crate::error::{TwoWaySqlError, TwoWaySqlResult};
use crate::node::{Node, SqlTemplate};
use crate::tokenizer::{SqlToken, SqlTokenizer};

/// Deepest nesting of IF/BEGIN/FOR/FIRST/LAST blocks accepted
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses a two-way SQL template into nodes
pub struct SqlAnalyzer<'a> {
    tokenizer: SqlTokenizer<'a>,
    for_depth: usize,
    depth: usize,
}

/// The block currently being parsed
enum Block<'e> {
    Root,
    If(&'e str),
    Begin,
    For(&'e str),
    First,
    Last,
}

impl Block<'_> {
    fn directive(&self) -> String {
        match self {
            Block::Root => String::new(),
            Block::If(expression) => format!("IF {expression}"),
            Block::Begin => "BEGIN".to_string(),
            Block::For(expression) => format!("FOR {expression}"),
            Block::First => "FIRST".to_string(),
            Block::Last => "LAST".to_string(),
        }
    }
}

/// A classified block comment
enum Directive<'a> {
    If(&'a str),
    Begin,
    End,
    For(&'a str),
    Next(&'a str),
    First,
    Last,
    LoopVariable(&'a str),
    Embedded(&'a str),
    Bind(&'a str),
    Plain,
}

/// Children of a parsed block, split at `-- ELSE`
struct Parsed {
    children: Vec<Node>,
    else_children: Option<Vec<Node>>,
}

impl<'a> SqlAnalyzer<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            tokenizer: SqlTokenizer::new(sql),
            for_depth: 0,
            depth: 0,
        }
    }

    /// Parse the whole template
    pub fn analyze(mut self) -> TwoWaySqlResult<SqlTemplate> {
        let parsed = self.parse_block(&Block::Root, 1)?;
        Ok(SqlTemplate::new(parsed.children))
    }

    fn parse_block(&mut self, block: &Block<'_>, opened_at: usize) -> TwoWaySqlResult<Parsed> {
        let mut children = Vec::new();
        let mut else_children: Option<Vec<Node>> = None;

        loop {
            let line = self.tokenizer.line();
            let Some(token) = self.tokenizer.next_token()? else {
                if matches!(block, Block::Root) {
                    return Ok(Parsed {
                        children,
                        else_children,
                    });
                }
                return Err(TwoWaySqlError::EndCommentNotFound {
                    directive: block.directive(),
                    line: opened_at,
                });
            };

            match token {
                SqlToken::Sql(text) => {
                    current(&mut children, &mut else_children).push(Node::Sql(text.to_string()))
                }
                SqlToken::LineComment(content) if content.trim() == "ELSE" => {
                    if !matches!(block, Block::If(_)) {
                        return Err(TwoWaySqlError::ElseCommentOutsideIf { line });
                    }
                    if else_children.is_some() {
                        return Err(TwoWaySqlError::DuplicateElseComment { line });
                    }
                    else_children = Some(Vec::new());
                }
                SqlToken::LineComment(content) => current(&mut children, &mut else_children)
                    .push(Node::Sql(format!("--{content}"))),
                SqlToken::BlockComment(content) => {
                    if let Directive::End = classify(content) {
                        if matches!(block, Block::Root) {
                            return Err(TwoWaySqlError::EndCommentWithoutBlock { line });
                        }
                        return Ok(Parsed {
                            children,
                            else_children,
                        });
                    }
                    let node = self.parse_directive(content, line)?;
                    current(&mut children, &mut else_children).push(node);
                }
            }
        }
    }

    fn parse_nested(&mut self, block: &Block<'_>, opened_at: usize) -> TwoWaySqlResult<Parsed> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(TwoWaySqlError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line: opened_at,
            });
        }
        self.depth += 1;
        let parsed = self.parse_block(block, opened_at);
        self.depth -= 1;
        parsed
    }

    fn parse_directive(&mut self, content: &str, line: usize) -> TwoWaySqlResult<Node> {
        match classify(content) {
            Directive::If(expression) => {
                if expression.is_empty() {
                    return Err(TwoWaySqlError::IfCommentEmptyExpression { line });
                }
                let parsed = self.parse_nested(&Block::If(expression), line)?;
                Ok(Node::If {
                    expression: expression.to_string(),
                    children: parsed.children,
                    else_children: parsed.else_children,
                })
            }
            Directive::Begin => {
                let parsed = self.parse_nested(&Block::Begin, line)?;
                Ok(Node::Begin {
                    children: parsed.children,
                })
            }
            Directive::For(expression) => {
                validate_path(expression, line)?;
                self.for_depth += 1;
                let parsed = self.parse_nested(&Block::For(expression), line);
                self.for_depth -= 1;
                Ok(Node::For {
                    expression: expression.to_string(),
                    children: parsed?.children,
                })
            }
            Directive::Next(argument) => {
                self.require_loop("NEXT", line)?;
                let separator = unquote(argument).ok_or_else(|| {
                    TwoWaySqlError::InvalidLoopSeparator {
                        argument: argument.to_string(),
                        line,
                    }
                })?;
                Ok(Node::Next { separator })
            }
            Directive::First => {
                self.require_loop("FIRST", line)?;
                let parsed = self.parse_nested(&Block::First, line)?;
                Ok(Node::First {
                    children: parsed.children,
                })
            }
            Directive::Last => {
                self.require_loop("LAST", line)?;
                let parsed = self.parse_nested(&Block::Last, line)?;
                Ok(Node::Last {
                    children: parsed.children,
                })
            }
            Directive::LoopVariable(expression) => {
                self.require_loop("#current", line)?;
                if expression != "current" && !expression.starts_with("current.") {
                    return Err(TwoWaySqlError::InvalidVariableExpression {
                        expression: format!("#{expression}"),
                        line,
                    });
                }
                validate_path(expression, line)?;
                let test_value = self.tokenizer.skip_test_value();
                Ok(Node::LoopVariable {
                    expression: expression.to_string(),
                    test_value: test_value.to_string(),
                })
            }
            Directive::Embedded(expression) => {
                validate_path(expression, line)?;
                let test_value = self.tokenizer.skip_test_value();
                Ok(Node::EmbeddedVariable {
                    expression: expression.to_string(),
                    test_value: test_value.to_string(),
                })
            }
            Directive::Bind(expression) => {
                validate_path(expression, line)?;
                let test_value = self.tokenizer.skip_test_value();
                Ok(Node::BindVariable {
                    expression: expression.to_string(),
                    test_value: test_value.to_string(),
                })
            }
            Directive::Plain => Ok(Node::Sql(format!("/*{content}*/"))),
            // handled by the caller
            Directive::End => Err(TwoWaySqlError::EndCommentWithoutBlock { line }),
        }
    }

    fn require_loop(&self, directive: &str, line: usize) -> TwoWaySqlResult<()> {
        if self.for_depth == 0 {
            return Err(TwoWaySqlError::LoopCommentOutsideFor {
                directive: directive.to_string(),
                line,
            });
        }
        Ok(())
    }
}

fn current<'v>(
    children: &'v mut Vec<Node>,
    else_children: &'v mut Option<Vec<Node>>,
) -> &'v mut Vec<Node> {
    match else_children {
        Some(nodes) => nodes,
        None => children,
    }
}

/// `keyword` followed by whitespace and an argument, or the bare keyword
fn keyword_argument<'c>(content: &'c str, keyword: &str) -> Option<&'c str> {
    let rest = content.strip_prefix(keyword)?;
    if rest.is_empty() {
        return Some("");
    }
    if rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

/// Whether a block comment's content is a two-way directive or variable
pub fn is_directive_comment(content: &str) -> bool {
    !matches!(classify(content), Directive::Plain)
}

fn classify(content: &str) -> Directive<'_> {
    match content {
        "BEGIN" => return Directive::Begin,
        "END" => return Directive::End,
        "FIRST" => return Directive::First,
        "LAST" => return Directive::Last,
        _ => {}
    }
    if let Some(expression) = keyword_argument(content, "IF") {
        return Directive::If(expression);
    }
    if let Some(expression) = keyword_argument(content, "FOR") {
        return Directive::For(expression);
    }
    if let Some(argument) = keyword_argument(content, "NEXT") {
        return Directive::Next(argument);
    }
    if let Some(expression) = content.strip_prefix('#') {
        return Directive::LoopVariable(expression.trim());
    }
    if let Some(expression) = content.strip_prefix('$') {
        return Directive::Embedded(expression.trim());
    }
    let starts_like_name = content
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if starts_like_name && !content.chars().any(char::is_whitespace) {
        return Directive::Bind(content);
    }
    Directive::Plain
}

/// Check that an expression is a dot-separated identifier path
fn validate_path(expression: &str, line: usize) -> TwoWaySqlResult<()> {
    let valid = !expression.is_empty()
        && expression.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(TwoWaySqlError::InvalidVariableExpression {
            expression: expression.to_string(),
            line,
        })
    }
}

/// Strip single quotes from a `'literal'`, resolving `''`
fn unquote(argument: &str) -> Option<String> {
    let inner = argument.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}
