use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::utils::colors::{GREY, colorize_optional, paint};
use crate::utils::date::{month_bounds, parse_date, parse_period, today};
use crate::utils::table::Table;
use crate::utils::time::format_duration;
use chrono::NaiveDate;

/// Inclusive date range for `--period`; the current month when omitted.
pub(crate) fn resolve_period(period: &Option<String>) -> AppResult<(NaiveDate, NaiveDate)> {
    match period {
        Some(p) => parse_period(p).map_err(AppError::InvalidDate),
        None => Ok(month_bounds(today())),
    }
}

pub(crate) fn in_range(record: &Record, (from, to): (NaiveDate, NaiveDate)) -> bool {
    parse_date(&record.date).is_some_and(|d| d >= from && d <= to)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        deleted,
        sessions,
    } = cmd
    {
        let range = resolve_period(period)?;
        let mut store = SqliteStore::open(&cfg.database)?;

        let records: Vec<Record> = store
            .read_all()?
            .into_iter()
            .filter(|r| *deleted || r.is_active())
            .filter(|r| in_range(r, range))
            .collect();

        if records.is_empty() {
            println!("No records between {} and {}", range.0, range.1);
            return Ok(());
        }

        let mut table = Table::new(&[
            "ID", "DATE", "WORK", "DEAL", "CATEGORY", "START", "END", "TIME", "SESS", "",
        ])
        .separator(&cfg.separator_char);

        for r in &records {
            let flags = match (r.is_deleted, r.is_completed) {
                (true, _) => paint(GREY, "deleted"),
                (false, true) => "done".to_string(),
                _ => String::new(),
            };

            table.add_row(vec![
                r.id.clone(),
                r.date.clone(),
                r.work_name.clone(),
                r.deal_name.clone(),
                r.category_name.clone(),
                colorize_optional(&r.start_time),
                colorize_optional(&r.end_time),
                format_duration(r.duration_minutes, cfg.duration_format),
                r.sessions.len().to_string(),
                flags,
            ]);

            if *sessions {
                for s in &r.sessions {
                    table.add_row(vec![
                        format!("  {}", s.id),
                        s.effective_date(&r.date).to_string(),
                        String::new(),
                        String::new(),
                        String::new(),
                        colorize_optional(&s.start_time),
                        colorize_optional(&s.end_time),
                        format_duration(s.duration_minutes, cfg.duration_format),
                        String::new(),
                        if s.is_open() { "running".into() } else { String::new() },
                    ]);
                }
            }
        }

        print!("{}", table.render());
        println!("{} record(s)", records.len());
    }
    Ok(())
}
