use std::path::{Path, PathBuf};

use kvsheet::config::{Config, OutputFormat, SeparatorMode};
use kvsheet::source::SourceFactory;
use kvsheet::{run_export, ExportError};
use rusqlite::Connection;
use tempfile::TempDir;

fn seed_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("accounts.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE accounts (id INTEGER, code TEXT, acc TEXT, tags TEXT);
         INSERT INTO accounts VALUES (1, '007', 'id-1-as-2', 'x|1');
         INSERT INTO accounts VALUES (2, '-3.50', NULL, '');
         INSERT INTO accounts VALUES (3, ' padded ', 'as-5-zz-9-orphan', 'y|2|x|3');",
    )
    .unwrap();
    path
}

fn config(db: &Path, output: &Path) -> Config {
    Config::new(db, output)
        .with_query("SELECT id, code, acc, tags FROM accounts ORDER BY id")
        .with_extraction_columns(vec!["acc".into()])
}

fn read_back(path: &Path) -> kvsheet::RowSet {
    SourceFactory::new()
        .fetch(path, &Config::default())
        .unwrap()
}

#[test]
fn xlsx_export_round_trips_fixed_columns() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.xlsx");

    let outcome = run_export(&config(&db, &out), &mut Vec::new()).unwrap();
    assert_eq!(outcome.stats.rows, 3);
    assert_eq!(outcome.output.as_deref(), Some(out.as_path()));

    let sheet = read_back(&out);
    assert_eq!(
        sheet.columns,
        vec!["id", "code", "acc", "tags", "acc:id", "acc:as", "acc:zz"]
    );

    // fixed columns come back verbatim as text
    assert_eq!(sheet.value(0, "code"), Some(Some("007")));
    assert_eq!(sheet.value(1, "code"), Some(Some("-3.50")));
    assert_eq!(sheet.value(2, "acc"), Some(Some("as-5-zz-9-orphan")));

    assert_eq!(sheet.value(0, "acc:id"), Some(Some("1")));
    assert_eq!(sheet.value(0, "acc:as"), Some(Some("2")));
    assert_eq!(sheet.value(0, "acc:zz"), Some(None));
    assert_eq!(sheet.value(1, "acc:as"), Some(None));
    assert_eq!(sheet.value(2, "acc:as"), Some(Some("5")));
    assert_eq!(sheet.value(2, "acc:zz"), Some(Some("9")));
}

#[test]
fn csv_export_with_literal_separator() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.csv");

    let config = config(&db, &out)
        .with_extraction_columns(vec!["tags".into(), "acc".into()])
        .with_separator("|", SeparatorMode::Literal);
    run_export(&config, &mut Vec::new()).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,code,acc,tags,tags:x,tags:y"));
    assert_eq!(lines.next(), Some("1,007,id-1-as-2,x|1,1,"));
    assert_eq!(lines.next(), Some("2,-3.50,,,,"));
    assert_eq!(lines.next(), Some("3, padded ,as-5-zz-9-orphan,y|2|x|3,3,2"));
}

#[test]
fn json_format_from_config() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.data");

    let config = config(&db, &out).with_format(OutputFormat::Json);
    run_export(&config, &mut Vec::new()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["header"][4], "acc:id");
    assert_eq!(value["rows"][1][2], serde_json::Value::Null);
}

#[test]
fn missing_extraction_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.xlsx");

    let config = config(&db, &out).with_extraction_columns(vec!["nope".into()]);
    let err = run_export(&config, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, ExportError::ColumnNotFound { .. }));
    assert!(!out.exists());
}

#[test]
fn source_failure_mid_iteration_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.xlsx");

    // abs() of the minimum integer overflows once the second row is reached
    let config = config(&db, &out).with_query(
        "SELECT id, CASE WHEN id = 2 THEN abs(-9223372036854775808) ELSE acc END AS acc \
         FROM accounts ORDER BY id",
    );
    let err = run_export(&config, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, ExportError::Query(_)));
    assert!(!out.exists());
}

#[test]
fn invalid_separator_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.xlsx");

    // the database does not exist; the separator error must win
    let config = config(&dir.path().join("absent.db"), &out)
        .with_separator("(", SeparatorMode::Regex);
    let err = run_export(&config, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidSeparator { .. }));
}

#[test]
fn preview_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let out = dir.path().join("out.xlsx");

    let mut buffer = Vec::new();
    let outcome = run_export(&config(&db, &out).with_preview(1), &mut buffer).unwrap();

    assert!(outcome.output.is_none());
    assert!(!out.exists());
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains("acc:as"));
    assert!(text.contains("... 2 more rows"));
}

#[test]
fn csv_source_to_xlsx() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    std::fs::write(&input, "name,x\nfirst,b-1-a-2\nsecond,a-2-b-1\n").unwrap();
    let out = dir.path().join("out.xlsx");

    let config = Config::new(&input, &out).with_extraction_columns(vec!["x".into()]);
    run_export(&config, &mut Vec::new()).unwrap();

    let sheet = read_back(&out);
    assert_eq!(sheet.columns, vec!["name", "x", "x:b", "x:a"]);
    assert_eq!(sheet.value(1, "x:a"), Some(Some("2")));
}

#[test]
fn joined_columns_with_same_name_are_both_exported() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("join.db");
    Connection::open(&db)
        .unwrap()
        .execute_batch(
            "CREATE TABLE a (id TEXT, acc TEXT);
             CREATE TABLE b (id TEXT);
             INSERT INTO a VALUES ('A1', 'k-v');
             INSERT INTO b VALUES ('B9');",
        )
        .unwrap();
    let out = dir.path().join("out.csv");

    let config = Config::new(&db, &out)
        .with_query("SELECT a.id, b.id, a.acc FROM a, b")
        .with_extraction_columns(vec!["acc".into()]);
    run_export(&config, &mut Vec::new()).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,id,acc,acc:k"));
    assert_eq!(lines.next(), Some("A1,B9,k-v,v"));
}

#[test]
fn input_and_output_sheet_names_are_independent() {
    let dir = TempDir::new().unwrap();
    let db = seed_db(&dir);
    let staged = dir.path().join("staged.xlsx");
    run_export(
        &config(&db, &staged).with_sheet_name("raw"),
        &mut Vec::new(),
    )
    .unwrap();

    let out = dir.path().join("out.xlsx");
    let config = Config::new(&staged, &out)
        .with_input_sheet("raw")
        .with_sheet_name("accounts")
        .with_extraction_columns(vec!["tags".into()])
        .with_separator("|", SeparatorMode::Literal);
    run_export(&config, &mut Vec::new()).unwrap();

    let sheet = SourceFactory::new()
        .fetch(&out, &Config::default().with_input_sheet("accounts"))
        .unwrap();
    assert_eq!(sheet.value(0, "tags:x"), Some(Some("1")));
    assert_eq!(sheet.value(2, "tags:y"), Some(Some("2")));

    // the output workbook has no sheet under the input name
    assert!(SourceFactory::new()
        .fetch(&out, &Config::default().with_input_sheet("raw"))
        .is_err());
}
