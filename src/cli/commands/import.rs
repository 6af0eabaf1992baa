use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::export::read_json;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

/// Import a JSON export. Records whose id already exists are skipped, so
/// re-importing the same file (or a copy from another device) never overwrites.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let incoming = read_json(&path)?;

        let mut store = SqliteStore::open(&cfg.database)?;
        let existing = store.read_all()?;

        let mut added = 0usize;
        let mut skipped = 0usize;
        for record in &incoming {
            if existing.iter().any(|r| r.id == record.id) {
                skipped += 1;
                continue;
            }
            store.insert_record(record)?;
            added += 1;
        }

        store.audit(
            "import",
            &path.display().to_string(),
            &format!("{} added, {} skipped", added, skipped),
        )?;

        success(format!("Imported {} record(s) from {}", added, path.display()));
        if skipped > 0 {
            warning(format!("{} record(s) already present were skipped", skipped));
        }
    }
    Ok(())
}
