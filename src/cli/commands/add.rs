use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::{WorkRequest, add_session, find_or_create_record};
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{fmt_date, parse_date};
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        record,
        work,
        deal,
        category,
    } = cmd
    {
        let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
        let date = fmt_date(d);

        let mut store = SqliteStore::open(&cfg.database)?;

        let record_id = match (record, work) {
            (Some(id), _) => id.clone(),
            (None, Some(work)) => {
                let req = WorkRequest {
                    category_name: category.clone().unwrap_or_default(),
                    ..WorkRequest::new(work, deal)
                };
                find_or_create_record(&mut store, &req, &date, cfg.duplicate_key)?.id
            }
            (None, None) => {
                return Err(AppError::Other(
                    "either --record or --work is required".into(),
                ));
            }
        };

        let (rec, session) = add_session(&mut store, &record_id, Some(date.as_str()), start, end)?;

        success(format!(
            "Session {} added to {} ({} - {}, {})",
            session.id,
            rec.id,
            session.start_time,
            session.end_time,
            format_duration(session.duration_minutes, cfg.duration_format)
        ));
    }
    Ok(())
}
