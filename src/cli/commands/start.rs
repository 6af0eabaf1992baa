use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::{WorkRequest, start_timer};
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start {
        work,
        deal,
        task,
        category,
        project_code,
    } = cmd
    {
        let mut store = SqliteStore::open(&cfg.database)?;

        let req = WorkRequest {
            task_name: task.clone().unwrap_or_default(),
            category_name: category.clone().unwrap_or_default(),
            project_code: project_code.clone().unwrap_or_default(),
            ..WorkRequest::new(work, deal)
        };

        let now = chrono::Local::now().naive_local();
        let (record, session) = start_timer(&mut store, &req, now, cfg.duplicate_key)?;

        success(format!(
            "Timer started at {} on {} ({})",
            session.start_time, record.id, record.work_name
        ));
    }
    Ok(())
}
