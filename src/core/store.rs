//! The record collection seen by the engine.
//!
//! The engine itself is pure over `&[Record]`; this trait is the seam through
//! which the CLI reads and mutates whatever actually owns the data
//! (the SQLite database, or memory in tests).

use crate::errors::{AppError, AppResult};
use crate::models::{Record, RecordPatch, Session};

pub trait RecordStore {
    /// Every record, soft-deleted ones included.
    fn read_all(&mut self) -> AppResult<Vec<Record>>;

    fn get(&mut self, id: &str) -> AppResult<Record> {
        self.read_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::RecordNotFound(id.to_string()))
    }

    fn insert_record(&mut self, record: &Record) -> AppResult<()>;

    fn update(&mut self, id: &str, patch: &RecordPatch) -> AppResult<Record>;

    /// Append a session and recompute the record's totals.
    fn append_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record>;

    /// Replace one session (matched by id) and recompute the record's totals.
    fn update_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record>;

    fn soft_delete(&mut self, id: &str, now: &str) -> AppResult<()>;

    fn restore(&mut self, id: &str) -> AppResult<()>;

    fn permanent_delete(&mut self, id: &str) -> AppResult<()>;

    /// Persist records changed by a merge (the survivor and the soft-deleted ones).
    fn save_records(&mut self, records: &[Record]) -> AppResult<()>;

    /// Running-timer pointer: `(record_id, session_id)`.
    fn active_session(&mut self) -> AppResult<Option<(String, String)>>;

    fn set_active_session(&mut self, active: Option<(&str, &str)>) -> AppResult<()>;

    /// Record an operation in the store's audit trail, if it keeps one.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// In-memory store, used by tests and as the reference implementation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub records: Vec<Record>,
    pub active: Option<(String, String)>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            active: None,
        }
    }

    fn find_mut(&mut self, id: &str) -> AppResult<&mut Record> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::RecordNotFound(id.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&mut self) -> AppResult<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn insert_record(&mut self, record: &Record) -> AppResult<()> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(AppError::Other(format!("record {} already exists", record.id)));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn update(&mut self, id: &str, patch: &RecordPatch) -> AppResult<Record> {
        let r = self.find_mut(id)?;
        r.apply(patch);
        Ok(r.clone())
    }

    fn append_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record> {
        let r = self.find_mut(record_id)?;
        r.sessions.push(session.clone());
        r.recompute_totals();
        Ok(r.clone())
    }

    fn update_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record> {
        let r = self.find_mut(record_id)?;
        let slot = r
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| AppError::RecordNotFound(session.id.clone()))?;
        *slot = session.clone();
        r.recompute_totals();
        Ok(r.clone())
    }

    fn soft_delete(&mut self, id: &str, now: &str) -> AppResult<()> {
        let r = self.find_mut(id)?;
        r.is_deleted = true;
        r.deleted_at = Some(now.to_string());
        Ok(())
    }

    fn restore(&mut self, id: &str) -> AppResult<()> {
        let r = self.find_mut(id)?;
        r.is_deleted = false;
        r.deleted_at = None;
        Ok(())
    }

    fn permanent_delete(&mut self, id: &str) -> AppResult<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(AppError::RecordNotFound(id.to_string()));
        }
        if self.active.as_ref().is_some_and(|(rid, _)| rid == id) {
            self.active = None;
        }
        Ok(())
    }

    fn save_records(&mut self, records: &[Record]) -> AppResult<()> {
        for rec in records {
            let r = self.find_mut(&rec.id)?;
            *r = rec.clone();
        }
        Ok(())
    }

    fn active_session(&mut self) -> AppResult<Option<(String, String)>> {
        Ok(self.active.clone())
    }

    fn set_active_session(&mut self, active: Option<(&str, &str)>) -> AppResult<()> {
        self.active = active.map(|(r, s)| (r.to_string(), s.to_string()));
        Ok(())
    }
}
