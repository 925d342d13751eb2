#![allow(non_snake_case)]

use super::*;
use crate::record::ColumnMeta;
use flutegen_core::DefaultValueMap;
use std::sync::atomic::{AtomicUsize, Ordering};

fn member_table() -> TableMeta {
    TableMeta::from_column_names(
        "MEMBER",
        ["MEMBER_ID", "MEMBER_NAME", "REGISTER_USER", "UPDATE_USER"],
    )
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn context<'a>(
    table: &'a TableMeta,
    default_values: Option<&'a DefaultValueMap>,
) -> ColumnSetupContext<'a> {
    ColumnSetupContext {
        file_name: "MEMBER.tsv",
        data_directory: Path::new("data/common"),
        table,
        default_values,
    }
}

#[test]
fn ListedColumnHandler___empty_columns___fails_not_found() {
    let table = member_table();
    let mut cols = Vec::new();

    let err = ListedColumnHandler::new()
        .setup_column_names(&mut cols, &context(&table, None))
        .unwrap_err();

    assert!(matches!(
        err,
        DelimiterDataError::ColumnDefinitionNotFound { ref table_name, .. } if table_name == "MEMBER"
    ));
}

#[test]
fn ListedColumnHandler___unknown_column___fails_listing_it() {
    let table = member_table();
    let mut cols = columns(&["MEMBER_ID", "NICKNAME", "member_name", "AGE"]);

    let err = ListedColumnHandler::new()
        .setup_column_names(&mut cols, &context(&table, None))
        .unwrap_err();

    let DelimiterDataError::ColumnDefinitionMismatch { unknown_columns, .. } = err else {
        panic!("expected ColumnDefinitionMismatch");
    };
    assert_eq!(unknown_columns, ["NICKNAME", "AGE"]);
}

#[test]
fn ListedColumnHandler___predicate_false___skips_check() {
    let table = member_table();
    let mut cols = columns(&["NICKNAME"]);

    let result = ListedColumnHandler::new()
        .with_check_predicate(|dir| !dir.ends_with("common"))
        .setup_column_names(&mut cols, &context(&table, None));

    assert!(result.is_ok());
    assert_eq!(cols, ["NICKNAME"]);
}

#[test]
fn ListedColumnHandler___from_config_disabled___skips_check() {
    let config = flutegen_core::DelimiterDataConfig {
        check_column_definition: false,
        ..Default::default()
    };
    let table = member_table();
    let mut cols = columns(&["NICKNAME"]);

    let result = ListedColumnHandler::from_config(&config)
        .setup_column_names(&mut cols, &context(&table, None));

    assert!(result.is_ok());
}

#[test]
fn ListedColumnHandler___custom_checker___receives_header_columns() {
    let calls = AtomicUsize::new(0);
    let table = member_table();
    let mut cols = columns(&["MEMBER_ID"]);

    ListedColumnHandler::new()
        .with_column_checker(|cols, ctx| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(cols, ["MEMBER_ID"]);
            assert_eq!(ctx.file_name, "MEMBER.tsv");
            Ok(())
        })
        .setup_column_names(&mut cols, &context(&table, None))
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn ListedColumnHandler___default_values___appended_in_declaration_order() {
    let table = member_table();
    let defaults: DefaultValueMap = [
        ("UPDATE_USER", "admin"),
        ("member_name", "ignored"),
        ("UNKNOWN_COL", "dropped"),
        ("REGISTER_USER", "admin"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let mut cols = columns(&["MEMBER_ID", "MEMBER_NAME"]);

    ListedColumnHandler::new()
        .setup_column_names(&mut cols, &context(&table, Some(&defaults)))
        .unwrap();

    assert_eq!(
        cols,
        ["MEMBER_ID", "MEMBER_NAME", "UPDATE_USER", "REGISTER_USER"]
    );
}

#[test]
fn check_columns_exist___typed_table___matches_case_insensitively() {
    let table = TableMeta::new(
        "PRODUCT",
        vec![ColumnMeta::new("PRODUCT_ID").not_null(), ColumnMeta::new("PRODUCT_NAME")],
    );
    let cols = columns(&["product_id", "Product_Name"]);

    assert!(check_columns_exist(&cols, &context(&table, None)).is_ok());
}
