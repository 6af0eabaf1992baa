use super::confirm;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::duplicates::find_duplicates_by;
use crate::core::merge::{MergeOutcome, merge_in_store};
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date::now_rfc3339;
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Merge { ids, key, all, yes } = cmd {
        let mut store = SqliteStore::open(&cfg.database)?;
        let records = store.read_all()?;

        let groups: Vec<Vec<String>> = if !ids.is_empty() {
            vec![ids.clone()]
        } else {
            let dups = find_duplicates_by(&records, &cfg.duplicate_key);
            match (key, all) {
                (Some(k), _) => {
                    let g = dups
                        .iter()
                        .find(|g| &g.key == k)
                        .ok_or_else(|| AppError::MergeGroupNotFound(vec![k.clone()]))?;
                    vec![g.record_ids()]
                }
                (None, true) => dups.iter().map(|g| g.record_ids()).collect(),
                (None, false) => {
                    return Err(AppError::Other(
                        "nothing to merge: use --ids, --key or --all".into(),
                    ));
                }
            }
        };

        if groups.is_empty() {
            info("No duplicate groups to merge.");
            return Ok(());
        }

        let prompt = format!(
            "Merge {} group(s)? Merged-away records will be soft-deleted.",
            groups.len()
        );
        if !confirm(&prompt, *yes) {
            info("Operation cancelled.");
            return Ok(());
        }

        let now = now_rfc3339();
        for ids in &groups {
            let outcome = merge_in_store(&mut store, ids, &now)?;
            report(&outcome, cfg);
        }
    }
    Ok(())
}

fn report(outcome: &MergeOutcome, cfg: &Config) {
    if outcome.deleted_ids.is_empty() {
        info(format!("{}: nothing to merge (single record).", outcome.merged_id));
        return;
    }

    success(format!(
        "Merged into {}: {} session(s), {} ; soft-deleted {}",
        outcome.merged_id,
        outcome.session_count,
        format_duration(outcome.duration_minutes, cfg.duration_format),
        outcome.deleted_ids.join(", ")
    ));

    for d in &outcome.dropped_metadata {
        warning(format!(
            "kept base value for {}; dropped '{}' from {}",
            d.field, d.value, d.record_id
        ));
    }
}
