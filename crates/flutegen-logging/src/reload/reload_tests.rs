#![allow(non_snake_case)]

use super::*;
use test_case::test_case;
use tracing_subscriber::prelude::*;

#[test_case(LogLevel::Trace, LevelFilter::TRACE)]
#[test_case(LogLevel::Debug, LevelFilter::DEBUG)]
#[test_case(LogLevel::Info, LevelFilter::INFO)]
#[test_case(LogLevel::Warn, LevelFilter::WARN)]
#[test_case(LogLevel::Error, LevelFilter::ERROR)]
#[test_case(LogLevel::Off, LevelFilter::OFF)]
fn convert_level_to_filter___maps_level(level: LogLevel, expected: LevelFilter) {
    assert_eq!(convert_level_to_filter(level), expected);
}

#[test]
fn ReloadHandle___not_initialized___fails() {
    let handle = ReloadHandle::new();

    let result = handle.reload_level(LogLevel::Debug);

    assert!(matches!(result, Err(ReloadError::NotInitialized)));
    assert!(!handle.is_initialized());
}

#[test]
fn ReloadHandle___with_handle___swaps_filter() {
    let (filter, reload_handle) = reload::Layer::new(LevelFilter::ERROR);
    let _subscriber = tracing_subscriber::registry().with(filter);
    let handle = ReloadHandle::new();
    handle.set_handle(reload_handle);

    let result = handle.reload_level(LogLevel::Warn);

    assert!(result.is_ok());
    assert!(handle.is_initialized());
}
