#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized log level parsing through the config
// ============================================================================

#[test_case("trace", LogLevel::Trace)]
#[test_case("debug", LogLevel::Debug)]
#[test_case("info", LogLevel::Info)]
#[test_case("warn", LogLevel::Warn)]
#[test_case("error", LogLevel::Error)]
fn FluteConfig___log_level___parses_configured_name(name: &str, expected: LogLevel) {
    let json = format!(r#"{{"log_level": "{name}"}}"#);

    let config = FluteConfig::from_json(json.as_bytes()).unwrap();

    assert_eq!(config.log_level().unwrap(), expected);
}

// ============================================================================
// Parameterized outside-sql switches
// ============================================================================

#[test_case(r#"{"check_if_comment_expression": false}"#, false, false, false)]
#[test_case(r#"{"required_title_check": true}"#, true, true, false)]
#[test_case(r#"{"required_description_check": true}"#, true, false, true)]
#[test_case(r#"{}"#, true, false, false)]
fn OutsideSqlConfig___from_json___applies_switches(
    json: &str,
    if_comment: bool,
    title: bool,
    description: bool,
) {
    let config: OutsideSqlConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.check_if_comment_expression, if_comment);
    assert_eq!(config.required_title_check, title);
    assert_eq!(config.required_description_check, description);
}

// ============================================================================
// Parameterized delimiter overrides
// ============================================================================

#[test_case(r#"{"delimiter": "\t"}"#, Some("\t"))]
#[test_case(r#"{"delimiter": ","}"#, Some(","))]
#[test_case(r#"{"delimiter": "||"}"#, Some("||"))]
#[test_case(r#"{}"#, None)]
fn DelimiterDataConfig___from_json___reads_delimiter(json: &str, expected: Option<&str>) {
    let config: DelimiterDataConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.delimiter.as_deref(), expected);
    assert!(config.validate().is_ok());
}
