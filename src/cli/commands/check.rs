use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::conflicts::find_conflicts;
use crate::core::duplicates::find_duplicates_by;
use crate::core::problems::find_problem_sessions_with_active;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::models::Record;
use crate::ui::messages::{header, success};
use crate::utils::date::today;
use crate::utils::table::Table;
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check {
        problems,
        conflicts,
        duplicates,
    } = cmd
    {
        let all = !(*problems || *conflicts || *duplicates);

        let mut store = SqliteStore::open(&cfg.database)?;
        let records = store.read_all()?;
        let active = store.active_session()?;
        let active_sid = active.as_ref().map(|(_, s)| s.as_str());

        if all || *problems {
            print_problems(&records, active_sid, cfg);
        }
        if all || *conflicts {
            print_conflicts(&records, cfg);
        }
        if all || *duplicates {
            print_duplicates(&records, cfg);
        }
    }
    Ok(())
}

fn print_problems(records: &[Record], active_sid: Option<&str>, cfg: &Config) {
    let found = find_problem_sessions_with_active(records, today(), active_sid);
    header(format!("Problems ({})", found.len()));
    if found.is_empty() {
        success("No problem sessions.");
        return;
    }

    let mut table = Table::new(&["SESSION", "TYPE", "DESCRIPTION"]).separator(&cfg.separator_char);
    for (sid, problems) in &found {
        for p in problems {
            table.add_row(vec![
                sid.clone(),
                p.kind.as_str().to_string(),
                p.description.clone(),
            ]);
        }
    }
    print!("{}", table.render());
}

fn print_conflicts(records: &[Record], cfg: &Config) {
    let found = find_conflicts(records);
    header(format!("Conflicts ({})", found.len()));
    if found.is_empty() {
        success("No overlapping sessions.");
        return;
    }

    let mut table = Table::new(&["DATE", "FIRST", "SECOND", "OVERLAP"]).separator(&cfg.separator_char);
    for c in &found {
        let side = |s: &crate::models::conflict::ConflictSide| {
            format!(
                "{} {}-{} ({})",
                s.record_id, s.session.start_time, s.session.end_time, s.work_name
            )
        };
        table.add_row(vec![
            c.date.clone(),
            side(&c.session1),
            side(&c.session2),
            format_duration(c.overlap_minutes, cfg.duration_format),
        ]);
    }
    print!("{}", table.render());
}

fn print_duplicates(records: &[Record], cfg: &Config) {
    let groups = find_duplicates_by(records, &cfg.duplicate_key);
    header(format!("Duplicate groups ({})", groups.len()));
    if groups.is_empty() {
        success("No duplicate records.");
        return;
    }

    let mut table = Table::new(&["KEY", "RECORDS", "SESSIONS", "TIME", "DATES", "IDS"])
        .separator(&cfg.separator_char);
    for g in &groups {
        table.add_row(vec![
            g.key.clone(),
            g.len().to_string(),
            g.total_sessions.to_string(),
            format_duration(g.total_duration, cfg.duration_format),
            g.date_range.clone(),
            g.record_ids().join(","),
        ]);
    }
    print!("{}", table.render());
}
