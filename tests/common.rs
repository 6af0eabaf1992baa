#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rworklog::models::{Record, Session};
use tempfile::TempDir;

pub fn rwl() -> Command {
    cargo_bin_cmd!("rworklog")
}

/// Fresh temp directory holding a database path; keep the `TempDir` alive.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(format!("{}_rworklog.sqlite", name));
    (dir, path.to_string_lossy().to_string())
}

/// Initialize a DB through the CLI (`--test` keeps the config file untouched).
pub fn init_db(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Closed session without its own date.
pub fn sess(id: &str, start: &str, end: &str) -> Session {
    Session::new(id, None, start, end)
}

/// Closed session with an explicit date.
pub fn sess_on(id: &str, date: &str, start: &str, end: &str) -> Session {
    Session::new(id, Some(date), start, end)
}

pub fn rec(id: &str, date: &str, work: &str, deal: &str, sessions: Vec<Session>) -> Record {
    Record::new(id, date, work, deal).with_sessions(sessions)
}
