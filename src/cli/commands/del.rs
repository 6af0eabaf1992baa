use super::confirm;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::now_rfc3339;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        id,
        purge,
        restore,
        yes,
    } = cmd
    {
        let mut store = SqliteStore::open(&cfg.database)?;
        // fail early on unknown ids, before prompting
        let record = store.get(id)?;

        if *restore {
            store.restore(&record.id)?;
            success(format!("Record {} restored.", record.id));
            return Ok(());
        }

        if *purge {
            let prompt = format!(
                "Permanently delete {} ({})? This action is irreversible.",
                record.id, record.work_name
            );
            if !confirm(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }
            store.permanent_delete(&record.id)?;
            success(format!("Record {} permanently deleted.", record.id));
            return Ok(());
        }

        store.soft_delete(&record.id, &now_rfc3339())?;
        success(format!(
            "Record {} moved to trash (restore with --restore).",
            record.id
        ));
    }
    Ok(())
}
