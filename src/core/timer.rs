//! Timer lifecycle: start/stop a running session, add sessions by hand.
//!
//! At most one session is open at a time; the store's active pointer names it.

use crate::core::duplicates::{IdentityKey, KeyStrategy};
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, Session};
use crate::utils::time::{is_valid_time, minutes_between};
use chrono::NaiveDateTime;
use log::info;

/// What to track when a timer is started or a session is added.
#[derive(Debug, Clone, Default)]
pub struct WorkRequest {
    pub work_name: String,
    pub deal_name: String,
    pub task_name: String,
    pub category_name: String,
    pub project_code: String,
}

impl WorkRequest {
    pub fn new(work_name: &str, deal_name: &str) -> Self {
        Self {
            work_name: work_name.to_string(),
            deal_name: deal_name.to_string(),
            ..Default::default()
        }
    }

    fn to_record(&self, id: &str, date: &str) -> Record {
        let mut r = Record::new(id, date, &self.work_name, &self.deal_name);
        r.task_name = self.task_name.clone();
        r.category_name = self.category_name.clone();
        r.project_code = self.project_code.clone();
        r
    }
}

fn next_record_id(records: &[Record], date: &str) -> String {
    let compact = date.replace('-', "");
    let mut n = records.len() + 1;
    loop {
        let id = format!("r-{}-{}", compact, n);
        if !records.iter().any(|r| r.id == id) {
            return id;
        }
        n += 1;
    }
}

fn next_session_id(record: &Record) -> String {
    let mut n = record.sessions.len() + 1;
    loop {
        let id = format!("s-{}-{}", record.id, n);
        if !record.sessions.iter().any(|s| s.id == id) {
            return id;
        }
        n += 1;
    }
}

/// The live record for `req` on `date`, created when none exists yet.
pub fn find_or_create_record<S: RecordStore + ?Sized>(
    store: &mut S,
    req: &WorkRequest,
    date: &str,
    strategy: KeyStrategy,
) -> AppResult<Record> {
    let records = store.read_all()?;
    let probe = req.to_record("", date);
    let wanted = strategy.key(&probe);

    if let Some(existing) = records
        .iter()
        .find(|r| r.is_active() && r.date == date && strategy.key(r) == wanted)
    {
        return Ok(existing.clone());
    }

    let record = req.to_record(&next_record_id(&records, date), date);
    store.insert_record(&record)?;
    info!("created record {} for {}", record.id, date);
    Ok(record)
}

/// Open a session for `req` at `now`. Fails if a timer is already running.
pub fn start_timer<S: RecordStore + ?Sized>(
    store: &mut S,
    req: &WorkRequest,
    now: NaiveDateTime,
    strategy: KeyStrategy,
) -> AppResult<(Record, Session)> {
    if let Some((_, sid)) = store.active_session()? {
        return Err(AppError::TimerAlreadyRunning(sid));
    }

    let date = now.format("%Y-%m-%d").to_string();
    let record = find_or_create_record(store, req, &date, strategy)?;

    let session = Session::open(
        &next_session_id(&record),
        Some(&date),
        &now.format("%H:%M").to_string(),
    );
    let record = store.append_session(&record.id, &session)?;
    store.set_active_session(Some((record.id.as_str(), session.id.as_str())))?;

    info!("timer started: {} / {}", record.id, session.id);
    Ok((record, session))
}

/// Close the running session at `now`.
///
/// A stop that lands before the start (e.g. across midnight) yields a zero
/// duration, which the problem detector then reports.
pub fn stop_timer<S: RecordStore + ?Sized>(
    store: &mut S,
    now: NaiveDateTime,
) -> AppResult<(Record, Session)> {
    let (record_id, session_id) = store.active_session()?.ok_or(AppError::NoActiveTimer)?;

    let record = store.get(&record_id)?;
    let mut session = record
        .sessions
        .iter()
        .find(|s| s.id == session_id)
        .cloned()
        .ok_or_else(|| AppError::RecordNotFound(session_id.clone()))?;

    session.end_time = now.format("%H:%M").to_string();
    session.duration_minutes = minutes_between(&session.start_time, &session.end_time);

    let record = store.update_session(&record_id, &session)?;
    store.set_active_session(None)?;

    info!(
        "timer stopped: {} / {} ({} min)",
        record.id, session.id, session.duration_minutes
    );
    Ok((record, session))
}

/// Append a closed session typed in by hand. Soft-deleted records are not eligible.
pub fn add_session<S: RecordStore + ?Sized>(
    store: &mut S,
    record_id: &str,
    date: Option<&str>,
    start: &str,
    end: &str,
) -> AppResult<(Record, Session)> {
    for t in [start, end] {
        if !is_valid_time(t) {
            return Err(AppError::InvalidTime(t.to_string()));
        }
    }

    let record = store.get(record_id)?;
    if record.is_deleted {
        return Err(AppError::RecordNotFound(record_id.to_string()));
    }
    let session = Session::new(&next_session_id(&record), date, start, end);
    let record = store.append_session(record_id, &session)?;
    Ok((record, session))
}
