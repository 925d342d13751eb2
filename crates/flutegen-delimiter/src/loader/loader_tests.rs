#![allow(non_snake_case)]

use super::*;
use flutegen_core::DefaultValueMap;
use indexmap::IndexMap;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use test_case::test_case;

fn member_table() -> TableMeta {
    TableMeta::from_column_names(
        "MEMBER",
        [
            "MEMBER_ID",
            "MEMBER_NAME",
            "MEMBER_STATUS_CODE",
            "REGISTER_USER",
        ],
    )
}

fn load(config: &DelimiterDataConfig, text: &str, delimiter: &str) -> (LoadResult, VecSink) {
    let mut sink = VecSink::new();
    let result = DelimiterDataLoader::new(config)
        .load_reader(
            Cursor::new(text),
            "MEMBER.tsv",
            Path::new("."),
            delimiter,
            &member_table(),
            &mut sink,
        )
        .unwrap();
    (result, sink)
}

fn pairs(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Delimiter resolution
// ============================================================================

#[test_case("MEMBER.tsv", "\t" ; "tsv")]
#[test_case("MEMBER.TSV", "\t" ; "upper case tsv")]
#[test_case("MEMBER.csv", "," ; "csv")]
fn DelimiterDataLoader___resolve_delimiter___from_extension(file: &str, expected: &str) {
    let config = DelimiterDataConfig::default();

    let delimiter = DelimiterDataLoader::new(&config)
        .resolve_delimiter(Path::new(file))
        .unwrap();

    assert_eq!(delimiter, expected);
}

#[test]
fn DelimiterDataLoader___resolve_delimiter___configured_wins() {
    let config = DelimiterDataConfig {
        delimiter: Some("|".to_string()),
        ..Default::default()
    };

    let delimiter = DelimiterDataLoader::new(&config)
        .resolve_delimiter(Path::new("MEMBER.csv"))
        .unwrap();

    assert_eq!(delimiter, "|");
}

#[test]
fn DelimiterDataLoader___resolve_delimiter___unknown_extension_fails() {
    let config = DelimiterDataConfig::default();

    let err = DelimiterDataLoader::new(&config)
        .resolve_delimiter(Path::new("MEMBER.txt"))
        .unwrap_err();

    assert!(matches!(err, DelimiterDataError::UnknownDelimiter { .. }));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn DelimiterDataLoader___tsv_rows___loaded_with_nulls() {
    let config = DelimiterDataConfig::default();
    let text = "MEMBER_ID\tMEMBER_NAME\n1\tStojkovic\n2\t\n";

    let (result, sink) = load(&config, text, "\t");

    assert_eq!(result.loaded_count, 2);
    assert_eq!(result.columns, ["MEMBER_ID", "MEMBER_NAME"]);
    assert!(result.warnings.is_empty());
    assert_eq!(sink.records[0].get("MEMBER_NAME"), Some("Stojkovic"));
    assert_eq!(sink.records[1].get("MEMBER_NAME"), None);
    assert!(sink.records[1].contains_column("MEMBER_NAME"));
}

#[test]
fn DelimiterDataLoader___value_count_mismatch___skipped_with_warning() {
    let config = DelimiterDataConfig::default();
    let text = "MEMBER_ID\tMEMBER_NAME\n1\ta\n2\n3\tc\textra\n4\td\n";

    let (result, sink) = load(&config, text, "\t");

    assert_eq!(result.loaded_count, 2);
    assert_eq!(
        result.warnings,
        vec![
            LoadWarning {
                line_number: 3,
                expected_columns: 2,
                actual_values: 1,
            },
            LoadWarning {
                line_number: 4,
                expected_columns: 2,
                actual_values: 3,
            },
        ]
    );
    assert_eq!(sink.records.len(), 2);
    assert_eq!(result.warnings[0].to_string(), "line 3: expected 2 values but found 1");
}

#[test]
fn DelimiterDataLoader___default_values___fill_missing_columns() {
    let mut config = DelimiterDataConfig::default();
    let defaults: DefaultValueMap = pairs(&[("REGISTER_USER", "loader"), ("NOT_A_COLUMN", "x")]);
    config.default_values.insert("member".to_string(), defaults);

    let (result, sink) = load(&config, "MEMBER_ID\n1\n", "\t");

    assert_eq!(result.columns, ["MEMBER_ID", "REGISTER_USER"]);
    assert_eq!(sink.records[0].get("REGISTER_USER"), Some("loader"));
}

#[test]
fn DelimiterDataLoader___column_convert___replaces_whole_values() {
    let mut config = DelimiterDataConfig::default();
    let mut convert = ConvertValueMap::new();
    convert.insert(
        "MEMBER_STATUS_CODE".to_string(),
        pairs(&[("1", "FML"), ("2", "WDL")]),
    );
    config.convert_values.insert("MEMBER".to_string(), convert);

    let (_, sink) = load(
        &config,
        "MEMBER_ID\tMEMBER_STATUS_CODE\n1\t1\n2\t2\n3\t12\n",
        "\t",
    );

    let codes: Vec<_> = sink
        .records
        .iter()
        .map(|r| r.get("MEMBER_STATUS_CODE"))
        .collect();
    assert_eq!(codes, [Some("FML"), Some("WDL"), Some("12")]);
}

#[test]
fn DelimiterDataLoader___line_convert___applied_before_tokenizing() {
    let mut config = DelimiterDataConfig::default();
    let mut convert = ConvertValueMap::new();
    convert.insert(LINE_CONVERT_KEY.to_string(), pairs(&[("\\N", "")]));
    config.convert_values.insert("MEMBER".to_string(), convert);

    let (_, sink) = load(&config, "MEMBER_ID\tMEMBER_NAME\n1\t\\N\n", "\t");

    assert_eq!(sink.records[0].get("MEMBER_NAME"), None);
}

#[test]
fn DelimiterDataLoader___blank_header___fails_not_found() {
    let config = DelimiterDataConfig::default();
    let mut sink = VecSink::new();

    let err = DelimiterDataLoader::new(&config)
        .load_reader(
            Cursor::new("\n\n"),
            "MEMBER.tsv",
            Path::new("."),
            "\t",
            &member_table(),
            &mut sink,
        )
        .unwrap_err();

    assert!(matches!(err, DelimiterDataError::ColumnDefinitionNotFound { .. }));
}

#[test]
fn DelimiterDataLoader___unknown_header_column___fails_when_checked() {
    let config = DelimiterDataConfig::default();
    let mut sink = VecSink::new();

    let err = DelimiterDataLoader::new(&config)
        .load_reader(
            Cursor::new("MEMBER_ID\tNICKNAME\n1\tx\n"),
            "MEMBER.tsv",
            Path::new("."),
            "\t",
            &member_table(),
            &mut sink,
        )
        .unwrap_err();

    assert!(matches!(err, DelimiterDataError::ColumnDefinitionMismatch { .. }));
    assert!(sink.records.is_empty());
}

struct FailingSink;

impl RecordSink for FailingSink {
    fn write(&mut self, _record: DataRecord) -> Result<(), SinkError> {
        Err("unique constraint violated".into())
    }
}

#[test]
fn DelimiterDataLoader___sink_error___wrapped_with_line_number() {
    let config = DelimiterDataConfig::default();

    let err = DelimiterDataLoader::new(&config)
        .load_reader(
            Cursor::new("MEMBER_ID\n\n7\n"),
            "MEMBER.tsv",
            Path::new("."),
            "\t",
            &member_table(),
            &mut FailingSink,
        )
        .unwrap_err();

    let DelimiterDataError::Sink { line_number, source, .. } = err else {
        panic!("expected Sink error");
    };
    assert_eq!(line_number, 3);
    assert_eq!(source.to_string(), "unique constraint violated");
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn DelimiterDataLoader___load_file___csv_with_quoted_multiline_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("MEMBER.csv");
    fs::write(
        &path,
        "\u{feff}MEMBER_ID,MEMBER_NAME\r\n1,\"Stojkovic, Pixy\"\r\n2,\"multi\r\nline\"\r\n",
    )
    .unwrap();
    let config = DelimiterDataConfig::default();
    let mut sink = VecSink::new();

    let result = DelimiterDataLoader::new(&config)
        .load_file(&path, &member_table(), &mut sink)
        .unwrap();

    assert_eq!(result.loaded_count, 2);
    assert_eq!(result.table_name, "MEMBER");
    assert_eq!(sink.records[0].get("MEMBER_NAME"), Some("Stojkovic, Pixy"));
    assert_eq!(sink.records[1].get("MEMBER_NAME"), Some("multi,line"));
}

#[test]
fn DelimiterDataLoader___load_file___missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let config = DelimiterDataConfig::default();
    let mut sink = VecSink::new();

    let err = DelimiterDataLoader::new(&config)
        .load_file(&dir.path().join("NONE.tsv"), &member_table(), &mut sink)
        .unwrap_err();

    assert!(matches!(err, DelimiterDataError::Io { .. }));
}

#[test]
fn DelimiterDataLoader___check_disabled_per_directory___loads_unknown_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("MEMBER.tsv");
    fs::write(&path, "MEMBER_ID\tNICKNAME\n1\tpix\n").unwrap();
    let config = DelimiterDataConfig::default();
    let data_dir = dir.path().to_path_buf();
    let handler = ListedColumnHandler::new().with_check_predicate(move |d| d != data_dir);
    let mut sink = VecSink::new();

    let result = DelimiterDataLoader::new(&config)
        .with_column_handler(handler)
        .load_file(&path, &member_table(), &mut sink)
        .unwrap();

    assert_eq!(result.loaded_count, 1);
    assert_eq!(sink.records[0].get("NICKNAME"), Some("pix"));
}
