use rworklog::errors::AppError;
use rworklog::export::{ExportFormat, SessionRow, ensure_writable, export_records, read_json};
use std::fs;

mod common;
use common::{rec, sess, sess_on};

fn sample() -> Vec<rworklog::models::Record> {
    let mut r1 = rec(
        "r1",
        "2025-06-02",
        "Website",
        "ACME, Inc.",
        vec![
            sess("s1", "09:00", "10:00"),
            sess_on("s2", "2025-06-03", "08:30", "09:00"),
        ],
    );
    r1.note = "call \"Bob\"".into();
    let r2 = rec("r2", "2025-06-04", "Docs", "", vec![]);
    vec![r1, r2]
}

#[test]
fn test_session_rows_use_effective_dates() {
    let records = sample();

    let rows = SessionRow::from_record(&records[0]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-06-02");
    assert_eq!(rows[1].date, "2025-06-03");
    assert_eq!(rows[1].session_id, "s2");
    assert_eq!(rows[1].duration_minutes, 30);

    // a record without sessions still gets one row
    let rows = SessionRow::from_record(&records[1]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].session_id, "");
}

#[test]
fn test_csv_export_quotes_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    export_records(&sample(), ExportFormat::Csv, &path, false).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with("record_id,date,work_name,deal_name"));
    assert_eq!(content.lines().count(), 4);
    assert!(content.contains("\"ACME, Inc.\""));
    assert!(content.contains("\"call \"\"Bob\"\"\""));
}

#[test]
fn test_json_export_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    let records = sample();
    export_records(&records, ExportFormat::Json, &path, false).unwrap();
    let back = read_json(&path).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_existing_file_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, "old").unwrap();

    assert!(matches!(
        ensure_writable(&path, false),
        Err(AppError::Export(_))
    ));
    assert!(matches!(
        export_records(&sample(), ExportFormat::Json, &path, false),
        Err(AppError::Export(_))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");

    export_records(&sample(), ExportFormat::Json, &path, true).unwrap();
    assert_eq!(read_json(&path).unwrap().len(), 2);
}

#[test]
fn test_export_format_parse() {
    assert_eq!(ExportFormat::parse("CSV").unwrap(), ExportFormat::Csv);
    assert_eq!(ExportFormat::parse("json").unwrap(), ExportFormat::Json);
    assert!(matches!(
        ExportFormat::parse("xlsx"),
        Err(AppError::InvalidExportFormat(_))
    ));
}

#[test]
fn test_import_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_json(&path), Err(AppError::Json(_))));
}
