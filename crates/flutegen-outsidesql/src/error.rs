//! Error types for outside-SQL checking
//!
//! Every failure is rendered as an [`AdvisoryMessage`]; the variant tells the
//! caller what kind of policy or structure was violated.

use flutegen_core::AdvisoryMessage;
use flutegen_twoway::{IfExpressionError, TwoWaySqlError};
use thiserror::Error;

/// Result type alias for outside-SQL checks
pub type OutsideSqlResult<T> = Result<T, OutsideSqlError>;

#[derive(Error, Debug, Clone)]
pub enum OutsideSqlError {
    /// A misspelled entity or parameter-bean mark
    #[error("{advisory}")]
    MarkInvalid { advisory: Box<AdvisoryMessage> },

    /// The two-way SQL does not parse
    #[error("{advisory}")]
    Parse {
        #[source]
        source: TwoWaySqlError,
        advisory: Box<AdvisoryMessage>,
    },

    /// An IF-comment expression is not well-formed
    #[error("{advisory}")]
    IfCommentInvalid {
        #[source]
        source: IfExpressionError,
        advisory: Box<AdvisoryMessage>,
    },

    #[error("{advisory}")]
    TitleNotFound { advisory: Box<AdvisoryMessage> },

    #[error("{advisory}")]
    TitleCollision { advisory: Box<AdvisoryMessage> },

    #[error("{advisory}")]
    DescriptionNotFound { advisory: Box<AdvisoryMessage> },

    #[error("{advisory}")]
    DescriptionCollision { advisory: Box<AdvisoryMessage> },
}

impl OutsideSqlError {
    /// The console report for this failure
    pub fn advisory(&self) -> &AdvisoryMessage {
        match self {
            OutsideSqlError::MarkInvalid { advisory }
            | OutsideSqlError::Parse { advisory, .. }
            | OutsideSqlError::IfCommentInvalid { advisory, .. }
            | OutsideSqlError::TitleNotFound { advisory }
            | OutsideSqlError::TitleCollision { advisory }
            | OutsideSqlError::DescriptionNotFound { advisory }
            | OutsideSqlError::DescriptionCollision { advisory } => advisory,
        }
    }

    /// The underlying two-way SQL error of a parse failure
    pub fn parse_error(&self) -> Option<&TwoWaySqlError> {
        match self {
            OutsideSqlError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn parse(source: TwoWaySqlError, file_name: &str, sql: &str) -> Self {
        let advisory = source.to_advisory(sql).with_entry("SQL File", file_name);
        OutsideSqlError::Parse {
            source,
            advisory: Box::new(advisory),
        }
    }

    pub(crate) fn if_comment(source: IfExpressionError, file_name: &str, sql: &str) -> Self {
        let advisory = source.to_advisory(sql).with_entry("SQL File", file_name);
        OutsideSqlError::IfCommentInvalid {
            source,
            advisory: Box::new(advisory),
        }
    }
}
