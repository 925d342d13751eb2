//! Integration tests for the flutegen binary.
//!
//! Runs the built executable in a scratch directory and checks exit status
//! and console output of each command.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn flutegen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flutegen"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const STRICT_CONFIG: &str = "\
[outside_sql]
required_title_check = true
required_description_check = true
";

// =============================================================================
// check-sql
// =============================================================================

mod check_sql {
    use super::*;

    #[test]
    fn check_sql___valid_directory___succeeds_with_summary() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flutegen.toml", STRICT_CONFIG);
        write(&dir, "sql/a.sql", "/*\n [Search A]\n By A.\n*/\nselect 1");
        write(&dir, "sql/b.sql", "/*\n [Search B]\n By B.\n*/\nselect 2");

        let output = flutegen(dir.path(), &["check-sql", "sql"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("✓ Files: 2"));
    }

    #[test]
    fn check_sql___duplicate_title___fails_with_advisory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flutegen.toml", STRICT_CONFIG);
        write(&dir, "sql/a.sql", "/*\n [Same]\n First.\n*/\nselect 1");
        write(&dir, "sql/b.sql", "/*\n [Same]\n Second.\n*/\nselect 2");

        let output = flutegen(dir.path(), &["check-sql", "sql"]);

        assert!(!output.status.success());
        let err = stderr(&output);
        assert!(err.contains("The title of the outside-SQL was duplicated."));
        assert!(err.contains("[SQL Files]"));
    }

    #[test]
    fn check_sql___unclosed_if___fails() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.sql", "select 1\n/*IF pmb.a != null*/where A = 1");

        let output = flutegen(dir.path(), &["check-sql", "broken.sql"]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("broken.sql"));
    }
}

// =============================================================================
// render-sql
// =============================================================================

mod render_sql {
    use super::*;

    #[test]
    fn render_sql___params___prints_sql_and_binds() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "search.sql",
            "select * from MEMBER\n/*BEGIN*/where\n  /*IF pmb.id != null*/MEMBER_ID = /*pmb.id*/3/*END*/\n  /*IF pmb.name != null*/and MEMBER_NAME = /*pmb.name*/'x'/*END*/\n/*END*/",
        );

        let output = flutegen(
            dir.path(),
            &["render-sql", "search.sql", "--params", r#"{"name":"Pixy"}"#],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let out = stdout(&output);
        assert!(out.contains("MEMBER_NAME = ?"));
        assert!(!out.contains("MEMBER_ID"));
        assert!(!out.contains("and MEMBER_NAME"));
        assert!(out.contains(r#"-- binds: ["Pixy"]"#));
    }

    #[test]
    fn render_sql___invalid_json___fails() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.sql", "select 1");

        let output = flutegen(dir.path(), &["render-sql", "a.sql", "--params", "{"]);

        assert!(!output.status.success());
    }
}

// =============================================================================
// load-data
// =============================================================================

mod load_data {
    use super::*;

    #[test]
    fn load_data___tsv___prints_json_lines() {
        let dir = TempDir::new().unwrap();
        write(&dir, "MEMBER.tsv", "MEMBER_ID\tMEMBER_NAME\n1\tPixy\n2\t\n");

        let output = flutegen(dir.path(), &["load-data", "MEMBER.tsv"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(
            stdout(&output),
            "{\"MEMBER_ID\":\"1\",\"MEMBER_NAME\":\"Pixy\"}\n{\"MEMBER_ID\":\"2\",\"MEMBER_NAME\":null}\n"
        );
        assert!(stderr(&output).contains("Loaded 2 record(s) into MEMBER"));
    }

    #[test]
    fn load_data___unknown_column___fails() {
        let dir = TempDir::new().unwrap();
        write(&dir, "MEMBER.csv", "MEMBER_ID,NICKNAME\n1,pix\n");

        let output = flutegen(
            dir.path(),
            &["load-data", "MEMBER.csv", "--table-columns", "MEMBER_ID,MEMBER_NAME"],
        );

        assert!(!output.status.success());
        assert!(stderr(&output).contains("NICKNAME"));
    }
}

// =============================================================================
// check-config
// =============================================================================

mod check_config {
    use super::*;

    #[test]
    fn check_config___valid_file___reports_policy() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flutegen.toml", STRICT_CONFIG);

        let output = flutegen(dir.path(), &["check-config"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("Configuration is valid!"));
        assert!(stdout(&output).contains("title required and unique"));
    }

    #[test]
    fn check_config___invalid_level___fails() {
        let dir = TempDir::new().unwrap();
        write(&dir, "custom.toml", "log_level = \"chatty\"\n");

        let output = flutegen(dir.path(), &["check-config", "--config", "custom.toml"]);

        assert!(!output.status.success());
    }

    #[test]
    fn check_config___no_file___checks_defaults() {
        let dir = TempDir::new().unwrap();

        let output = flutegen(dir.path(), &["check-config"]);

        assert!(output.status.success());
        assert!(stdout(&output).contains("checking defaults"));
    }
}
