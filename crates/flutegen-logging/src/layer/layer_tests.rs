#![allow(non_snake_case)]

use super::*;
use crate::sink::MemorySink;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

fn capture(level: LogLevel) -> (&'static LogSinkManager, Arc<MemorySink>) {
    let manager: &'static LogSinkManager = Box::leak(Box::new(LogSinkManager::new()));
    let sink = Arc::new(MemorySink::new());
    manager.set_sink(Some(sink.clone()));
    manager.set_level(level);
    (manager, sink)
}

#[test]
fn ConsoleLayer___convert_level___maps_every_level() {
    assert_eq!(ConsoleLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(ConsoleLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(ConsoleLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(ConsoleLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(ConsoleLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn ConsoleLayer___events___filtered_by_threshold() {
    let (manager, sink) = capture(LogLevel::Info);
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_manager(manager));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "check", "first");
        tracing::debug!(target: "check", "hidden");
        tracing::error!(target: "check", "second");
    });

    assert_eq!(
        sink.lines(),
        vec!["INFO  check: first".to_string(), "ERROR check: second".to_string()]
    );
}

#[test]
fn ConsoleLayer___fields___appended_as_key_value() {
    let (manager, sink) = capture(LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_manager(manager));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "load", file = "MEMBER.tsv", loaded = 3, "delimiter data loaded");
    });

    assert_eq!(
        sink.lines(),
        vec!["INFO  load: delimiter data loaded file=MEMBER.tsv loaded=3".to_string()]
    );
}

#[test]
fn ConsoleLayer___event_without_message___fields_only() {
    let (manager, sink) = capture(LogLevel::Info);
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_manager(manager));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "t", line = 4);
    });

    assert_eq!(sink.lines(), vec!["WARN  t: line=4".to_string()]);
}

#[test]
fn ConsoleLayer___level_changed___applies_to_next_event() {
    let (manager, sink) = capture(LogLevel::Error);
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_manager(manager));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "t", "before");
        manager.set_level(LogLevel::Warn);
        tracing::warn!(target: "t", "after");
    });

    assert_eq!(sink.lines(), vec!["WARN  t: after".to_string()]);
}
