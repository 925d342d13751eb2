//! Error types for two-way SQL analysis and IF-comment evaluation

use flutegen_core::AdvisoryMessage;
use thiserror::Error;

/// Result type alias for two-way SQL operations
pub type TwoWaySqlResult<T> = Result<T, TwoWaySqlError>;

/// Structural and rendering failures of a two-way SQL template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TwoWaySqlError {
    /// A `/*` without its closing `*/`
    #[error("block comment is not closed (line {line})")]
    UnclosedBlockComment { line: usize },

    /// IF/BEGIN/FOR/FIRST/LAST block reached the end of the SQL
    #[error("END comment not found for /*{directive}*/ (line {line})")]
    EndCommentNotFound { directive: String, line: usize },

    /// `/*END*/` with no open block
    #[error("END comment without an open block (line {line})")]
    EndCommentWithoutBlock { line: usize },

    /// `-- ELSE` outside of an IF block
    #[error("ELSE comment outside of an IF comment (line {line})")]
    ElseCommentOutsideIf { line: usize },

    /// A second `-- ELSE` in the same IF block
    #[error("duplicate ELSE comment in one IF comment (line {line})")]
    DuplicateElseComment { line: usize },

    /// `/*IF*/` without an expression
    #[error("IF comment has no expression (line {line})")]
    IfCommentEmptyExpression { line: usize },

    /// Bind, embedded, FOR, or loop variable that is not a property path
    #[error("invalid variable expression '{expression}' (line {line})")]
    InvalidVariableExpression { expression: String, line: usize },

    /// NEXT/FIRST/LAST/#current used outside of a FOR block
    #[error("{directive} comment outside of a FOR comment (line {line})")]
    LoopCommentOutsideFor { directive: String, line: usize },

    /// `/*NEXT ...*/` whose argument is not a quoted literal
    #[error("NEXT comment needs a quoted separator but got '{argument}' (line {line})")]
    InvalidLoopSeparator { argument: String, line: usize },

    /// Blocks nested deeper than the analyzer accepts
    #[error("blocks are nested deeper than {limit} levels (line {line})")]
    NestingTooDeep { limit: usize, line: usize },

    /// FOR over a parameter that is neither a list nor null
    #[error("FOR comment parameter is not a list: {expression}")]
    ForCommentNotList { expression: String },

    /// An empty list bound to a list placeholder
    #[error("empty list bound to {expression}")]
    BindListEmpty { expression: String },

    /// An IF-comment expression failed to parse or evaluate
    #[error(transparent)]
    IfExpression(#[from] IfExpressionError),
}

impl TwoWaySqlError {
    /// Build the console advisory for this failure
    pub fn to_advisory(&self, sql: &str) -> AdvisoryMessage {
        let builder = match self {
            TwoWaySqlError::UnclosedBlockComment { line } => {
                AdvisoryMessage::builder("The block comment was not closed.")
                    .advice("Close every /* with */ in the SQL.")
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::EndCommentNotFound { directive, line } => {
                AdvisoryMessage::builder("The END comment was not found.")
                    .advice("IF, BEGIN, FOR, FIRST and LAST comments need /*END*/.")
                    .advice("For example:")
                    .advice("  /*IF pmb.memberName != null*/")
                    .advice("  and MEMBER_NAME = /*pmb.memberName*/'Pixy'")
                    .advice("  /*END*/")
                    .entry("Directive", format!("/*{directive}*/"))
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::EndCommentWithoutBlock { line } => {
                AdvisoryMessage::builder("The END comment has no open block.")
                    .advice("Remove the extra /*END*/ or add the missing IF/BEGIN/FOR comment.")
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::ElseCommentOutsideIf { line } => {
                AdvisoryMessage::builder("The ELSE comment is outside of an IF comment.")
                    .advice("Write -- ELSE directly inside /*IF ...*/ and /*END*/.")
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::DuplicateElseComment { line } => {
                AdvisoryMessage::builder("The IF comment has two ELSE comments.")
                    .advice("One IF comment accepts only one -- ELSE.")
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::IfCommentEmptyExpression { line } => {
                AdvisoryMessage::builder("The IF comment has no expression.")
                    .advice("Write a boolean expression, e.g. /*IF pmb.memberId != null*/.")
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::InvalidVariableExpression { expression, line } => {
                AdvisoryMessage::builder("The variable comment is not a property path.")
                    .advice("Use dot-separated names, e.g. /*pmb.memberName*/'Pixy'.")
                    .entry("Expression", expression.clone())
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::LoopCommentOutsideFor { directive, line } => {
                AdvisoryMessage::builder("The loop comment is outside of a FOR comment.")
                    .advice("NEXT, FIRST, LAST and #current are valid only inside /*FOR ...*/.")
                    .entry("Directive", directive.clone())
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::InvalidLoopSeparator { argument, line } => {
                AdvisoryMessage::builder("The NEXT comment separator is not a quoted literal.")
                    .advice("Quote the separator, e.g. /*NEXT 'or '*/.")
                    .entry("Argument", argument.clone())
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::NestingTooDeep { limit, line } => {
                AdvisoryMessage::builder("The two-way comments are nested too deeply.")
                    .advice(format!("Nest IF, BEGIN and FOR comments at most {limit} levels deep."))
                    .entry("Line", line.to_string())
            }
            TwoWaySqlError::ForCommentNotList { expression } => {
                AdvisoryMessage::builder("The FOR comment parameter is not a list.")
                    .advice("Bind a list (or null to skip the loop).")
                    .entry("Expression", expression.clone())
            }
            TwoWaySqlError::BindListEmpty { expression } => {
                AdvisoryMessage::builder("An empty list was bound to a list placeholder.")
                    .advice("Guard the condition with an IF comment, e.g. /*IF pmb.idList.size() > 0*/.")
                    .entry("Expression", expression.clone())
            }
            TwoWaySqlError::IfExpression(err) => return err.to_advisory(sql),
        };
        builder.entry("SQL", sql).build()
    }
}

/// Result type alias for IF-comment expressions
pub type IfExpressionResult<T> = Result<T, IfExpressionError>;

/// Syntax and evaluation failures of an IF-comment expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IfExpressionError {
    #[error("unexpected character '{found}' at {position} in IF expression: {expression}")]
    UnexpectedCharacter {
        expression: String,
        position: usize,
        found: char,
    },

    #[error("unterminated string literal at {position} in IF expression: {expression}")]
    UnterminatedString { expression: String, position: usize },

    #[error("unexpected '{found}' at {position} in IF expression: {expression}")]
    UnexpectedToken {
        expression: String,
        position: usize,
        found: String,
    },

    #[error("IF expression ended unexpectedly: {expression}")]
    UnexpectedEnd { expression: String },

    #[error("unknown method '{method}()' in IF expression: {expression}")]
    UnknownMethod { expression: String, method: String },

    #[error("'{method}()' cannot be applied to {found} in IF expression: {expression}")]
    MethodNotApplicable {
        expression: String,
        method: String,
        found: String,
    },

    #[error("IF expression is not boolean ({found}): {expression}")]
    NotBoolean { expression: String, found: String },

    #[error("IF expression is nested deeper than {limit} levels: {expression}")]
    NestingTooDeep { expression: String, limit: usize },

    #[error("cannot compare {left} with {right} in IF expression: {expression}")]
    Incomparable {
        expression: String,
        left: String,
        right: String,
    },
}

impl IfExpressionError {
    /// The expression text that failed
    pub fn expression(&self) -> &str {
        match self {
            IfExpressionError::UnexpectedCharacter { expression, .. }
            | IfExpressionError::UnterminatedString { expression, .. }
            | IfExpressionError::UnexpectedToken { expression, .. }
            | IfExpressionError::UnexpectedEnd { expression }
            | IfExpressionError::UnknownMethod { expression, .. }
            | IfExpressionError::MethodNotApplicable { expression, .. }
            | IfExpressionError::NotBoolean { expression, .. }
            | IfExpressionError::NestingTooDeep { expression, .. }
            | IfExpressionError::Incomparable { expression, .. } => expression,
        }
    }

    /// Build the console advisory for this failure
    pub fn to_advisory(&self, sql: &str) -> AdvisoryMessage {
        AdvisoryMessage::builder("Failed to evaluate the IF comment expression.")
            .advice("Supported: && || ! ( ) == != < <= > >= null true false,")
            .advice("numbers, 'strings', pmb.property paths, size() and isEmpty().")
            .entry("IF Comment", self.expression())
            .entry("Reason", self.to_string())
            .entry("SQL", sql)
            .build()
    }
}
