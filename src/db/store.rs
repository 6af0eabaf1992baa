//! [`RecordStore`] backed by SQLite. Every mutation is written to the audit log.

use crate::core::store::RecordStore;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, RecordPatch, Session};

pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    /// Open `path` and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Load, modify and write back one record in a single transaction.
    fn modify<F>(&mut self, id: &str, op: &str, message: &str, f: F) -> AppResult<Record>
    where
        F: FnOnce(&mut Record) -> AppResult<()>,
    {
        self.pool.with_tx(|tx| {
            let mut rec = queries::load_record(tx, id)?;
            f(&mut rec)?;
            queries::upsert_record(tx, &rec)?;
            ttlog(tx, op, id, message)?;
            Ok(rec)
        })
    }
}

impl RecordStore for SqliteStore {
    fn read_all(&mut self) -> AppResult<Vec<Record>> {
        queries::load_all_records(&self.pool.conn)
    }

    fn get(&mut self, id: &str) -> AppResult<Record> {
        queries::load_record(&self.pool.conn, id)
    }

    fn insert_record(&mut self, record: &Record) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            if queries::record_exists(tx, &record.id)? {
                return Err(AppError::Other(format!(
                    "record {} already exists",
                    record.id
                )));
            }
            queries::upsert_record(tx, record)?;
            ttlog(
                tx,
                "add",
                &record.id,
                &format!("{} / {} on {}", record.work_name, record.deal_name, record.date),
            )
        })
    }

    fn update(&mut self, id: &str, patch: &RecordPatch) -> AppResult<Record> {
        self.modify(id, "edit", "record updated", |r| {
            r.apply(patch);
            Ok(())
        })
    }

    fn append_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record> {
        let msg = format!("session {} appended", session.id);
        self.modify(record_id, "session", &msg, |r| {
            r.sessions.push(session.clone());
            r.recompute_totals();
            Ok(())
        })
    }

    fn update_session(&mut self, record_id: &str, session: &Session) -> AppResult<Record> {
        let msg = format!(
            "session {} set to {}-{}",
            session.id, session.start_time, session.end_time
        );
        self.modify(record_id, "session", &msg, |r| {
            let slot = r
                .sessions
                .iter_mut()
                .find(|s| s.id == session.id)
                .ok_or_else(|| AppError::RecordNotFound(session.id.clone()))?;
            *slot = session.clone();
            r.recompute_totals();
            Ok(())
        })
    }

    fn soft_delete(&mut self, id: &str, now: &str) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            queries::set_deleted(tx, id, Some(now))?;
            ttlog(tx, "del", id, "soft-deleted")
        })
    }

    fn restore(&mut self, id: &str) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            queries::set_deleted(tx, id, None)?;
            ttlog(tx, "restore", id, "restored")
        })
    }

    fn permanent_delete(&mut self, id: &str) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            queries::delete_record(tx, id)?;
            if queries::load_active(tx)?.is_some_and(|(rid, _)| rid == id) {
                queries::store_active(tx, None)?;
            }
            ttlog(tx, "purge", id, "permanently deleted")
        })
    }

    fn save_records(&mut self, records: &[Record]) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            for r in records {
                if !queries::record_exists(tx, &r.id)? {
                    return Err(AppError::RecordNotFound(r.id.clone()));
                }
                queries::upsert_record(tx, r)?;
            }
            Ok(())
        })
    }

    fn active_session(&mut self) -> AppResult<Option<(String, String)>> {
        queries::load_active(&self.pool.conn)
    }

    fn set_active_session(&mut self, active: Option<(&str, &str)>) -> AppResult<()> {
        self.pool.with_tx(|tx| {
            queries::store_active(tx, active)?;
            match active {
                Some((rid, sid)) => ttlog(tx, "start", rid, &format!("timer running on {}", sid)),
                None => ttlog(tx, "stop", "", "timer cleared"),
            }
        })
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}
