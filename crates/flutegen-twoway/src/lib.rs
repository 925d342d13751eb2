//! flutegen-twoway - Two-way SQL templates
//!
//! Two-way SQL runs unchanged in a plain SQL client because every directive
//! lives in a comment and is followed by a test value:
//!
//! ```sql
//! select * from MEMBER
//! /*BEGIN*/where
//!   /*IF pmb.memberId != null*/MEMBER_ID = /*pmb.memberId*/3/*END*/
//!   /*IF pmb.memberName != null*/and MEMBER_NAME like /*pmb.memberName*/'S%'/*END*/
//! /*END*/
//! ```
//!
//! This crate provides:
//! - [`SqlTokenizer`] splitting a template into SQL text and comments
//! - [`SqlAnalyzer`] building a [`SqlTemplate`] node tree
//! - [`SqlTemplate::render`] producing [`RenderedSql`] against a JSON bean
//! - [`IfExpression`] for IF-comment expressions and their evaluation

mod analyzer;
mod error;
mod expression;
mod node;
mod render;
mod tokenizer;

pub use analyzer::{is_directive_comment, SqlAnalyzer, MAX_NESTING_DEPTH};
pub use error::{IfExpressionError, IfExpressionResult, TwoWaySqlError, TwoWaySqlResult};
pub use expression::{
    IfExpression, JsonParameterResolver, NullResolver, ParameterResolver, MAX_EXPRESSION_DEPTH,
};
pub use node::{Node, RenderedSql, SqlTemplate};
pub use tokenizer::{SqlToken, SqlTokenizer};

/// Parse a two-way SQL template
pub fn parse(sql: &str) -> TwoWaySqlResult<SqlTemplate> {
    SqlAnalyzer::new(sql).analyze()
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        IfExpression, IfExpressionError, ParameterResolver, RenderedSql, SqlAnalyzer, SqlTemplate,
        TwoWaySqlError, TwoWaySqlResult,
    };
}
