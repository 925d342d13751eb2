//! flutegen-logging - Console logging for the flutegen tools
//!
//! This crate provides:
//! - [`ConsoleLayer`] tracing layer that formats events as console lines
//! - [`LogSink`] destinations for those lines ([`StderrSink`], [`MemorySink`])
//! - [`ReloadHandle`] for changing the log level after initialization

mod layer;
mod reload;
mod sink;

pub use flutegen_core::LogLevel;
pub use layer::{ConsoleLayer, init_logging};
pub use reload::{ReloadError, ReloadHandle};
pub use sink::{LogSink, LogSinkManager, MemorySink, StderrSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ConsoleLayer, LogLevel, LogSink, LogSinkManager, ReloadHandle, init_logging};
}
