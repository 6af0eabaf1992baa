use super::list::{in_range, resolve_period};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats;
use crate::core::store::RecordStore;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::models::Record;
use crate::ui::messages::header;
use crate::utils::colors::{color_for_change, paint};
use crate::utils::date::{previous_range, today};
use crate::utils::table::Table;
use crate::utils::time::format_duration;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { period } = cmd {
        let range = resolve_period(period)?;
        let mut store = SqliteStore::open(&cfg.database)?;
        let all = store.read_all()?;
        let in_period: Vec<Record> = all.iter().filter(|r| in_range(r, range)).cloned().collect();
        let fmt = |m: i64| format_duration(m, cfg.duration_format);

        header(format!("{} .. {}", range.0, range.1));

        let summary = stats::summarize(&in_period, today());
        let cmp = stats::compare_periods(&all, previous_range(range.0, range.1), range);
        let prod = stats::productivity(&all, range.0, range.1);
        let streaks = stats::streaks(&all, today());

        println!("Records:        {}", summary.records);
        println!("Sessions:       {}", summary.sessions);
        println!(
            "Total time:     {} ({} vs previous period)",
            fmt(cmp.current),
            paint(
                color_for_change(cmp.change_percent),
                &format!("{:+.1}%", cmp.change_percent)
            )
        );
        println!(
            "Active days:    {} (avg {} / day)",
            prod.active_days,
            fmt(prod.average_per_active_day.round() as i64)
        );
        println!(
            "Completed:      {} ({:.0}%)",
            prod.completed_records, prod.completion_rate
        );
        println!(
            "Streak:         {} day(s) (longest {})",
            streaks.current, streaks.longest
        );
        println!(
            "Consistency:    {} problem(s), {} conflict(s), {} duplicate group(s)",
            summary.problem_sessions, summary.conflicts, summary.duplicate_groups
        );

        header("By category");
        print_breakdown(&stats::category_breakdown(&in_period), cfg);

        header("By work");
        print_breakdown(&stats::work_breakdown(&in_period), cfg);

        header("Weeks");
        let mut weeks = Table::new(&["WEEK", "TIME", "SESSIONS"]).separator(&cfg.separator_char);
        for w in stats::weekly_totals(&in_period) {
            weeks.add_row(vec![w.period, fmt(w.minutes), w.sessions.to_string()]);
        }
        print!("{}", weeks.render());

        header("Session length");
        for b in stats::duration_histogram(&in_period) {
            println!("{:>7}  {}", b.label, b.count);
        }

        header("Weekdays");
        for (day, minutes) in WEEKDAYS.iter().zip(stats::weekday_heatmap(&in_period)) {
            println!("{}  {}", day, fmt(minutes));
        }

        let hours = stats::hour_heatmap(&in_period);
        if let Some((h, m)) = hours.iter().enumerate().max_by_key(|(_, m)| **m)
            && *m > 0
        {
            println!("\nPeak hour: {:02}:00 ({})", h, fmt(*m));
        }
    }
    Ok(())
}

fn print_breakdown(rows: &[stats::Breakdown], cfg: &Config) {
    let mut table = Table::new(&["NAME", "TIME", "%"]).separator(&cfg.separator_char);
    for b in rows {
        table.add_row(vec![
            b.name.clone(),
            format_duration(b.minutes, cfg.duration_format),
            format!("{:.1}", b.percent),
        ]);
    }
    print!("{}", table.render());
}
