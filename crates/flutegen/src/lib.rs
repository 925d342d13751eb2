//! # flutegen
//!
//! Database-first tooling around hand-written SQL and seed data:
//! - Two-way SQL templates that run unchanged in a SQL client and render
//!   conditionally against a parameter bean
//! - Outside-SQL checking of marks, IF comments, titles and descriptions
//! - Delimited (TSV/CSV) data loading with quoting, `""` escapes and values
//!   spanning several lines
//!
//! ## Rendering Two-way SQL
//!
//! ```
//! use flutegen::prelude::*;
//! use serde_json::json;
//!
//! let template = flutegen::twoway::parse(
//!     "select * from MEMBER\n\
//!      /*BEGIN*/where\n\
//!        /*IF pmb.memberId != null*/MEMBER_ID = /*pmb.memberId*/3/*END*/\n\
//!        /*IF pmb.memberName != null*/and MEMBER_NAME like /*pmb.memberName*/'S%'/*END*/\n\
//!      /*END*/",
//! )
//! .unwrap();
//!
//! let rendered = template.render(&json!({ "memberName": "S%" })).unwrap();
//! assert!(rendered.sql.contains("MEMBER_NAME like ?"));
//! assert!(!rendered.sql.contains("and MEMBER_NAME"));
//! assert_eq!(rendered.bind_values, vec![json!("S%")]);
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`flutegen_core`] - Configuration, advisory messages, log levels
//! - [`flutegen_delimiter`] - Delimited data tokenizing and loading
//! - [`flutegen_twoway`] - Two-way SQL parsing and rendering
//! - [`flutegen_outsidesql`] - Outside-SQL checking
//! - [`flutegen_logging`] - Console logging setup

pub use flutegen_core::{
    AdvisoryMessage, ConfigError, ConfigResult, DelimiterDataConfig, FluteConfig, LogLevel,
    OutsideSqlConfig,
};

/// Delimited data tokenizing and loading
pub mod delimiter {
    pub use flutegen_delimiter::*;
}

/// Two-way SQL parsing and rendering
pub mod twoway {
    pub use flutegen_twoway::*;
}

/// Outside-SQL checking
pub mod outsidesql {
    pub use flutegen_outsidesql::*;
}

/// Console logging setup
pub mod logging {
    pub use flutegen_logging::*;
}

// Re-export common dependencies that callers need
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use flutegen::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Configuration: `FluteConfig`, `OutsideSqlConfig`, `DelimiterDataConfig`
/// - Two-way SQL: `SqlTemplate`, `RenderedSql`, `IfExpression`
/// - Checking: `OutsideSqlChecker`, `ValidationSession`
/// - Loading: `DelimiterDataLoader`, `ValueLineAnalyzer`, `TableMeta`
pub mod prelude {
    pub use crate::{AdvisoryMessage, DelimiterDataConfig, FluteConfig, LogLevel, OutsideSqlConfig};

    pub use flutegen_delimiter::prelude::*;
    pub use flutegen_outsidesql::prelude::*;
    pub use flutegen_twoway::prelude::*;
}
