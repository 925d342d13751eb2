//! Tracing layer that formats events for the console

use crate::reload::{ReloadHandle, convert_level_to_filter};
use crate::sink::LogSinkManager;
use flutegen_core::LogLevel;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::reload;

/// Tracing layer that writes each event as one console line
///
/// The line is `LEVEL target: message key=value ...`.
#[derive(Debug)]
pub struct ConsoleLayer {
    manager: &'static LogSinkManager,
}

impl ConsoleLayer {
    /// Layer writing through the global [`LogSinkManager`]
    pub fn new() -> Self {
        Self {
            manager: LogSinkManager::global(),
        }
    }

    pub fn with_manager(manager: &'static LogSinkManager) -> Self {
        Self { manager }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for ConsoleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if !self.manager.is_enabled(level) {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        self.manager
            .log(level, metadata.target(), &visitor.into_message());
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.manager
            .is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Collects the `message` field and renders the others as `key=value`
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        let _ = write!(self.fields, " {name}={value}");
    }

    fn into_message(self) -> String {
        if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Install the console subscriber as the global default
///
/// Sets the threshold of the global [`LogSinkManager`] and registers a
/// reloadable level filter with [`ReloadHandle::global`]. Returns `false`
/// when another global subscriber was already installed; the threshold is
/// updated either way.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    LogSinkManager::global().set_level(level);

    let (filter, handle) = reload::Layer::new(convert_level_to_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(ConsoleLayer::new());

    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        ReloadHandle::global().set_handle(handle);
    }
    installed
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
