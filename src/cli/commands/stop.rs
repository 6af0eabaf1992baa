use crate::config::Config;
use crate::core::timer::stop_timer;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::format_duration;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = SqliteStore::open(&cfg.database)?;

    let now = chrono::Local::now().naive_local();
    let (record, session) = stop_timer(&mut store, now)?;

    success(format!(
        "Timer stopped at {}: {} (record total {})",
        session.end_time,
        format_duration(session.duration_minutes, cfg.duration_format),
        format_duration(record.duration_minutes, cfg.duration_format),
    ));
    Ok(())
}
