use crate::errors::AppResult;
use crate::models::Record;
use serde::Serialize;
use std::path::Path;

/// One CSV line: a session flattened together with its record.
#[derive(Debug, Serialize)]
pub struct SessionRow<'a> {
    pub record_id: &'a str,
    pub date: &'a str,
    pub work_name: &'a str,
    pub deal_name: &'a str,
    pub task_name: &'a str,
    pub category_name: &'a str,
    pub project_code: &'a str,
    pub session_id: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub duration_minutes: i64,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub note: &'a str,
}

impl<'a> SessionRow<'a> {
    /// Rows for `record`; a record without sessions gives one row with its own totals.
    pub fn from_record(record: &'a Record) -> Vec<Self> {
        let base = |session_id: &'a str,
                    date: &'a str,
                    start_time: &'a str,
                    end_time: &'a str,
                    duration_minutes: i64| SessionRow {
            record_id: &record.id,
            date,
            work_name: &record.work_name,
            deal_name: &record.deal_name,
            task_name: &record.task_name,
            category_name: &record.category_name,
            project_code: &record.project_code,
            session_id,
            start_time,
            end_time,
            duration_minutes,
            is_completed: record.is_completed,
            is_deleted: record.is_deleted,
            note: &record.note,
        };

        if record.sessions.is_empty() {
            return vec![base(
                "",
                &record.date,
                &record.start_time,
                &record.end_time,
                record.duration_minutes,
            )];
        }

        record
            .sessions
            .iter()
            .map(|s| {
                base(
                    &s.id,
                    s.effective_date(&record.date),
                    &s.start_time,
                    &s.end_time,
                    s.duration_minutes,
                )
            })
            .collect()
    }
}

/// Write one CSV row per session.
pub fn write_csv(path: &Path, records: &[Record]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for record in records {
        for row in SessionRow::from_record(record) {
            wtr.serialize(row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
