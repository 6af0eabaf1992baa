use crate::errors::{AppError, AppResult};
use crate::models::{Record, Session};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

const ACTIVE_RECORD_KEY: &str = "active_record_id";
const ACTIVE_SESSION_KEY: &str = "active_session_id";

fn map_record(row: &Row) -> Result<Record> {
    Ok(Record {
        id: row.get("id")?,
        date: row.get("date")?,
        work_name: row.get("work_name")?,
        deal_name: row.get("deal_name")?,
        task_name: row.get("task_name")?,
        category_name: row.get("category_name")?,
        project_code: row.get("project_code")?,
        duration_minutes: row.get("duration_minutes")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        sessions: Vec::new(),
        is_completed: row.get::<_, i32>("is_completed")? == 1,
        is_deleted: row.get::<_, i32>("is_deleted")? == 1,
        deleted_at: row.get("deleted_at")?,
        completed_at: row.get("completed_at")?,
        note: row.get("note")?,
    })
}

fn map_session(row: &Row) -> Result<(String, Session)> {
    Ok((
        row.get("record_id")?,
        Session {
            id: row.get("id")?,
            date: row.get("date")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            duration_minutes: row.get("duration_minutes")?,
        },
    ))
}

/// Every record with its sessions, ordered by date then id.
pub fn load_all_records(conn: &Connection) -> AppResult<Vec<Record>> {
    let mut stmt = conn.prepare("SELECT * FROM records ORDER BY date ASC, id ASC")?;
    let rows = stmt.query_map([], map_record)?;

    let mut records = Vec::new();
    for r in rows {
        records.push(r?);
    }

    let mut stmt = conn.prepare("SELECT * FROM sessions ORDER BY record_id, position ASC")?;
    let rows = stmt.query_map([], map_session)?;

    let mut by_record: HashMap<String, Vec<Session>> = HashMap::new();
    for r in rows {
        let (record_id, session) = r?;
        by_record.entry(record_id).or_default().push(session);
    }

    for rec in records.iter_mut() {
        if let Some(sessions) = by_record.remove(&rec.id) {
            rec.sessions = sessions;
        }
    }

    Ok(records)
}

pub fn load_record(conn: &Connection, id: &str) -> AppResult<Record> {
    let mut rec = conn
        .query_row("SELECT * FROM records WHERE id = ?1", [id], map_record)
        .optional()?
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))?;

    let mut stmt =
        conn.prepare("SELECT * FROM sessions WHERE record_id = ?1 ORDER BY position ASC")?;
    let rows = stmt.query_map([id], map_session)?;
    for r in rows {
        rec.sessions.push(r?.1);
    }

    Ok(rec)
}

pub fn record_exists(conn: &Connection, id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM records WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

/// Insert or fully overwrite a record and its session list.
pub fn upsert_record(conn: &Connection, r: &Record) -> AppResult<()> {
    conn.execute(
        "INSERT INTO records (id, date, work_name, deal_name, task_name, category_name,
                              project_code, duration_minutes, start_time, end_time,
                              is_completed, is_deleted, deleted_at, completed_at, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(id) DO UPDATE SET
             date = excluded.date,
             work_name = excluded.work_name,
             deal_name = excluded.deal_name,
             task_name = excluded.task_name,
             category_name = excluded.category_name,
             project_code = excluded.project_code,
             duration_minutes = excluded.duration_minutes,
             start_time = excluded.start_time,
             end_time = excluded.end_time,
             is_completed = excluded.is_completed,
             is_deleted = excluded.is_deleted,
             deleted_at = excluded.deleted_at,
             completed_at = excluded.completed_at,
             note = excluded.note",
        params![
            r.id,
            r.date,
            r.work_name,
            r.deal_name,
            r.task_name,
            r.category_name,
            r.project_code,
            r.duration_minutes,
            r.start_time,
            r.end_time,
            if r.is_completed { 1 } else { 0 },
            if r.is_deleted { 1 } else { 0 },
            r.deleted_at,
            r.completed_at,
            r.note,
        ],
    )?;

    replace_sessions(conn, &r.id, &r.sessions)
}

fn replace_sessions(conn: &Connection, record_id: &str, sessions: &[Session]) -> AppResult<()> {
    conn.execute("DELETE FROM sessions WHERE record_id = ?1", [record_id])?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO sessions (id, record_id, position, date, start_time, end_time, duration_minutes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    for (pos, s) in sessions.iter().enumerate() {
        stmt.execute(params![
            s.id,
            record_id,
            pos as i64,
            s.date,
            s.start_time,
            s.end_time,
            s.duration_minutes,
        ])?;
    }

    Ok(())
}

pub fn set_deleted(conn: &Connection, id: &str, deleted_at: Option<&str>) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE records SET is_deleted = ?1, deleted_at = ?2 WHERE id = ?3",
        params![if deleted_at.is_some() { 1 } else { 0 }, deleted_at, id],
    )?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(id.to_string()));
    }
    Ok(())
}

pub fn delete_record(conn: &Connection, id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM sessions WHERE record_id = ?1", [id])?;
    let changed = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(id.to_string()));
    }
    Ok(())
}

fn get_state(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

pub fn load_active(conn: &Connection) -> AppResult<Option<(String, String)>> {
    match (
        get_state(conn, ACTIVE_RECORD_KEY)?,
        get_state(conn, ACTIVE_SESSION_KEY)?,
    ) {
        (Some(r), Some(s)) => Ok(Some((r, s))),
        _ => Ok(None),
    }
}

pub fn store_active(conn: &Connection, active: Option<(&str, &str)>) -> AppResult<()> {
    conn.execute(
        "DELETE FROM state WHERE key IN (?1, ?2)",
        [ACTIVE_RECORD_KEY, ACTIVE_SESSION_KEY],
    )?;

    if let Some((record_id, session_id)) = active {
        let mut stmt = conn.prepare_cached("INSERT INTO state (key, value) VALUES (?1, ?2)")?;
        stmt.execute([ACTIVE_RECORD_KEY, record_id])?;
        stmt.execute([ACTIVE_SESSION_KEY, session_id])?;
    }

    Ok(())
}
