//! flutegen-delimiter - Delimiter-separated data loading
//!
//! This crate provides:
//! - [`FirstLineAnalyzer`] reading column names from the header line
//! - [`ValueLineAnalyzer`] tokenizing data lines with quoting, `""` escapes
//!   and values that continue on the next physical line
//! - [`LineDirectFilter`] applying `$$LINE$$` substitutions to raw lines
//! - [`ListedColumnHandler`] building the effective column list
//! - [`RecordReader`] and [`DelimiterDataLoader`] driving a whole file into
//!   a [`RecordSink`]
//!
//! # Example
//!
//! ```
//! use flutegen_delimiter::ValueLineAnalyzer;
//!
//! let info = ValueLineAnalyzer::new(",").analyze(r#""a,b","say ""hi""",c"#);
//! assert_eq!(info.values(), ["a,b", r#"say "hi""#, "c"]);
//! assert!(!info.is_continue_next_line());
//! ```

mod column_handler;
mod error;
mod first_line;
mod line_filter;
mod loader;
mod reader;
mod record;
mod value_line;

pub use column_handler::{check_columns_exist, ColumnSetupContext, ListedColumnHandler};
pub use error::{DelimiterDataError, DelimiterDataResult, SinkError};
pub use first_line::{FirstLineAnalyzer, FirstLineInfo};
pub use line_filter::LineDirectFilter;
pub use loader::{DelimiterDataLoader, LoadResult, LoadWarning, RecordSink, VecSink};
pub use reader::{LogicalRecord, RecordReader};
pub use record::{ColumnMeta, DataRecord, TableMeta};
pub use value_line::{ValueLineAnalyzer, ValueLineInfo};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DataRecord, DelimiterDataError, DelimiterDataLoader, DelimiterDataResult,
        FirstLineAnalyzer, RecordSink, TableMeta, ValueLineAnalyzer,
    };
}
