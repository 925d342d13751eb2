//! flutegen-outsidesql - Outside-SQL marks and checking
//!
//! This crate provides:
//! - [`SqlMarkAnalyzer`] reading titles, descriptions and generation marks
//! - [`OutsideSqlChecker`] validating a file before generation or execution
//! - [`ValidationSession`] and [`SharedValidationSession`] carrying title and
//!   description uniqueness across one run
//! - [`OutsideSqlError`] with a console advisory for every failure
//!
//! # Example
//!
//! ```
//! use flutegen_outsidesql::{OutsideSqlChecker, ValidationSession};
//!
//! let checker = OutsideSqlChecker::new().with_required_title_check(true);
//! let mut session = ValidationSession::new();
//! let sql = "/*\n [Member Search]\n*/\nselect * from MEMBER";
//!
//! let checked = checker.check(&mut session, "MemberBhv_selectMember.sql", sql).unwrap();
//! assert_eq!(checked.title.as_deref(), Some("Member Search"));
//! ```

mod checker;
mod error;
mod mark;
mod session;

pub use checker::{CheckedSql, OutsideSqlChecker, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use error::{OutsideSqlError, OutsideSqlResult};
pub use mark::{PmbProperty, SqlMarkAnalyzer, AUTO_DETECT_MARK, ENTITY_MARK, PMB_MARK};
pub use session::{SharedValidationSession, UniquenessRegistry, ValidationSession};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CheckedSql, OutsideSqlChecker, OutsideSqlError, OutsideSqlResult, SharedValidationSession,
        SqlMarkAnalyzer, UniquenessRegistry, ValidationSession,
    };
}
