use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, GREEN, MAGENTA, RED, RESET, YELLOW, paint};
use crate::utils::table::Table;

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" | "session" | "start" | "import" => GREEN,
        "del" | "purge" => RED,
        "edit" | "merge" | "restore" => YELLOW,
        "migration_applied" => MAGENTA,
        "export" | "init" => BLUE,
        _ => RESET,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = SqliteStore::open(&cfg.database)?;
        let entries = load_log(&store.pool.conn)?;

        println!("📜 Internal log:\n");
        let mut table = Table::new(&["ID", "DATE", "OPERATION", "TARGET", "MESSAGE"])
            .separator(&cfg.separator_char);
        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(e.date);
            table.add_row(vec![
                e.id.to_string(),
                date,
                paint(color_for_operation(&e.operation), &e.operation),
                e.target,
                e.message,
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
