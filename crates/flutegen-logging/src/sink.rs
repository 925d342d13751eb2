//! Console line destinations

use flutegen_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Receives one formatted console line per event
pub trait LogSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str);
}

/// Writes lines to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&self, _level: LogLevel, line: &str) {
        eprintln!("{line}");
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, _level: LogLevel, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

static SINK_MANAGER: OnceCell<LogSinkManager> = OnceCell::new();

/// Routes console lines to the installed sink above a level threshold
///
/// Without an installed sink, lines go to standard error.
pub struct LogSinkManager {
    sink: RwLock<Option<Arc<dyn LogSink>>>,
    level: AtomicU8,
}

impl LogSinkManager {
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// The process-wide manager used by [`crate::init_logging`]
    pub fn global() -> &'static LogSinkManager {
        SINK_MANAGER.get_or_init(LogSinkManager::new)
    }

    pub fn set_sink(&self, sink: Option<Arc<dyn LogSink>>) {
        *self.sink.write() = sink;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.read().is_some()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// `Off` is never enabled, whatever the threshold
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Format and write one line if `level` passes the threshold
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let line = format_line(level, target, message);
        match self.sink.read().as_ref() {
            Some(sink) => sink.write_line(level, &line),
            None => StderrSink.write_line(level, &line),
        }
    }
}

impl Default for LogSinkManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogSinkManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSinkManager")
            .field("level", &self.level())
            .field("has_sink", &self.has_sink())
            .finish()
    }
}

fn format_line(level: LogLevel, target: &str, message: &str) -> String {
    if target.is_empty() {
        format!("{level:<5} {message}")
    } else {
        format!("{level:<5} {target}: {message}")
    }
}
