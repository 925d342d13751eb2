//! Property-based tests for delimited value tokenizing
//!
//! Data files are hand-edited, so tokenizing must never panic and every
//! correctly quoted line must give back exactly the values written.

use flutegen_delimiter::{FirstLineAnalyzer, RecordReader, ValueLineAnalyzer};
use proptest::prelude::*;
use std::io::Cursor;

// Strategy: a value that needs no quoting
fn arb_plain_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{0,12}"
}

// Strategy: a value with quotes, delimiters or nothing at all
fn arb_awkward_value() -> impl Strategy<Value = String> {
    "[a-z\",]{0,12}"
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

// Strategy: (value, quoted) fields; plain fields never touch a quote
fn arb_fields() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(
        prop_oneof![
            arb_plain_value().prop_map(|v| (v, false)),
            arb_awkward_value().prop_map(|v| (v, true)),
        ],
        1..10,
    )
}

fn encode(fields: &[(String, bool)]) -> String {
    fields
        .iter()
        .map(|(value, quoted)| if *quoted { quote(value) } else { value.clone() })
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    /// Property: plain values split back unchanged
    #[test]
    fn proptest_plain_values_round_trip(values in prop::collection::vec(arb_plain_value(), 1..10)) {
        let line = values.join(",");

        let info = ValueLineAnalyzer::new(",").analyze(&line);

        prop_assert!(!info.is_continue_next_line());
        prop_assert_eq!(info.values(), values.as_slice());
    }

    /// Property: correctly quoted lines decode to the written values
    #[test]
    fn proptest_quoted_values_round_trip(fields in arb_fields()) {
        let line = encode(&fields);

        let info = ValueLineAnalyzer::new(",").analyze(&line);

        let expected: Vec<String> = fields.into_iter().map(|(value, _)| value).collect();
        prop_assert!(!info.is_continue_next_line(), "line {:?}", line);
        prop_assert_eq!(info.values(), expected.as_slice());
    }

    /// Property: analyzing the same line twice gives the same result
    #[test]
    fn proptest_analyze_is_deterministic(line in ".{0,80}") {
        let analyzer = ValueLineAnalyzer::new("\t");

        prop_assert_eq!(analyzer.analyze(&line), analyzer.analyze(&line));
    }

    /// Property: any text with any delimiter tokenizes without panicking
    #[test]
    fn proptest_analyze_arbitrary_text(
        line in "[a-z\"\t,|: ]{0,60}",
        delimiter in prop_oneof![Just(","), Just("\t"), Just("|"), Just("::"), Just("")],
    ) {
        let _ = ValueLineAnalyzer::new(delimiter).analyze(&line);
        let _ = FirstLineAnalyzer::new(delimiter).analyze(&line);
    }

    /// Property: a quoted value broken across lines joins with the delimiter
    #[test]
    fn proptest_continued_value_joins_lines(
        head in "[a-z ]{0,10}",
        tail in "[a-z ]{0,10}",
    ) {
        let text = format!("ID,MEMO\n1,\"{head}\n{tail}\",end\n");
        let mut reader = RecordReader::new(Cursor::new(text), ",", "t.csv");
        reader.read_header().unwrap();

        let record = reader.next_record().unwrap().unwrap();

        prop_assert_eq!(record.values, vec!["1".to_string(), format!("{head},{tail}"), "end".to_string()]);
    }
}
