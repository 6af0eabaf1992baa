use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::export::export_records;
use crate::models::Record;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        deleted,
        force,
    } = cmd
    {
        let mut store = SqliteStore::open(&cfg.database)?;
        let records: Vec<Record> = store
            .read_all()?
            .into_iter()
            .filter(|r| *deleted || r.is_active())
            .collect();

        let path = expand_tilde(file);
        export_records(&records, *format, &path, *force)?;

        store.audit("export", format.as_str(), &path.display().to_string())?;
        success(format!(
            "{} export completed: {} ({} record(s))",
            format.as_str().to_uppercase(),
            path.display(),
            records.len()
        ));
    }
    Ok(())
}
