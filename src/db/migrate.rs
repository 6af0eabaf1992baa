use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Base schema: records, their sessions and the running-timer pointer.
fn create_base_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id               TEXT PRIMARY KEY,
            date             TEXT NOT NULL,
            work_name        TEXT NOT NULL DEFAULT '',
            deal_name        TEXT NOT NULL DEFAULT '',
            task_name        TEXT NOT NULL DEFAULT '',
            category_name    TEXT NOT NULL DEFAULT '',
            project_code     TEXT NOT NULL DEFAULT '',
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            start_time       TEXT NOT NULL DEFAULT '',
            end_time         TEXT NOT NULL DEFAULT '',
            is_completed     INTEGER NOT NULL DEFAULT 0,
            is_deleted       INTEGER NOT NULL DEFAULT 0,
            deleted_at       TEXT,
            completed_at     TEXT,
            note             TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id               TEXT NOT NULL,
            record_id        TEXT NOT NULL REFERENCES records(id) ON DELETE CASCADE,
            position         INTEGER NOT NULL,
            date             TEXT,
            start_time       TEXT NOT NULL DEFAULT '',
            end_time         TEXT NOT NULL DEFAULT '',
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (record_id, position)
        );

        CREATE TABLE IF NOT EXISTS state (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
        CREATE INDEX IF NOT EXISTS idx_records_identity ON records(work_name, deal_name);
        CREATE INDEX IF NOT EXISTS idx_sessions_record ON sessions(record_id, position);
        "#,
    )
}

/// Apply `step` once, remembering it in the `log` table.
fn apply_once<F>(conn: &Connection, version: &str, message: &str, step: F) -> AppResult<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    if is_applied(conn, version)? {
        return Ok(());
    }

    step(conn).map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;
    ttlog(conn, "migration_applied", version, message)?;
    ::log::info!("migration applied: {}", version);
    Ok(())
}

/// Public entry point: run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    apply_once(
        conn,
        "20250301_0001_base_schema",
        "Created records, sessions and state tables",
        create_base_schema,
    )?;

    Ok(())
}
