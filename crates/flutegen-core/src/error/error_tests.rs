#![allow(non_snake_case)]

use super::*;

#[test]
fn ConfigError___invalid_value___displays_key_and_value() {
    let err = ConfigError::InvalidValue {
        key: "delimiter".into(),
        value: "".into(),
    };

    assert_eq!(err.to_string(), "invalid value for delimiter: ");
}

#[test]
fn ConfigError___empty_value___displays_key() {
    let err = ConfigError::EmptyValue("log_level".into());

    assert_eq!(err.to_string(), "empty value for log_level");
}

#[test]
fn ConfigError___from_serde_error___converts_to_parse() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: ConfigError = json_err.into();

    assert!(matches!(err, ConfigError::Parse(_)));
}
