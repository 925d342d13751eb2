#![allow(non_snake_case)]

use super::*;

#[test]
fn DelimiterDataError___mismatch___lists_unknown_columns() {
    let err = DelimiterDataError::ColumnDefinitionMismatch {
        file_name: "MEMBER.tsv".to_string(),
        table_name: "MEMBER".to_string(),
        unknown_columns: vec!["NICKNAME".to_string(), "AGE".to_string()],
    };

    let advisory = err.to_advisory();

    assert_eq!(
        advisory.section("Unknown Columns").unwrap(),
        &["NICKNAME".to_string(), "AGE".to_string()]
    );
    assert_eq!(advisory.section("Table").unwrap(), &["MEMBER".to_string()]);
    assert!(err.to_string().contains("NICKNAME"));
}

#[test]
fn DelimiterDataError___unterminated___reports_line() {
    let err = DelimiterDataError::UnterminatedQuotedValue {
        file_name: "MEMBER.csv".to_string(),
        line_number: 12,
    };

    assert_eq!(
        err.to_string(),
        "quoted value starting at line 12 is not closed: file=MEMBER.csv"
    );
    assert_eq!(
        err.to_advisory().section("Line Number").unwrap(),
        &["12".to_string()]
    );
}

#[test]
fn DelimiterDataError___sink___keeps_source() {
    use std::error::Error as _;

    let err = DelimiterDataError::Sink {
        file_name: "MEMBER.tsv".to_string(),
        line_number: 4,
        source: "duplicate key".into(),
    };

    assert_eq!(err.source().unwrap().to_string(), "duplicate key");
    assert_eq!(
        err.to_advisory().section("Cause").unwrap(),
        &["duplicate key".to_string()]
    );
}

#[test]
fn DelimiterDataError___io___advisory_names_file() {
    let err = DelimiterDataError::Io {
        file_name: "MEMBER.tsv".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };

    let advisory = err.to_advisory();

    assert_eq!(advisory.section("Data File").unwrap(), &["MEMBER.tsv".to_string()]);
    assert!(advisory.to_string().contains("Failed to read the data file."));
}
