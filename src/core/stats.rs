//! Rollups over the record collection.
//!
//! Every reducer skips soft-deleted records and only reads its input.
//! Minutes are attributed to the session's effective date; a record without
//! sessions contributes its own `duration_minutes` on its own date.

use crate::core::{conflicts, duplicates, problems};
use crate::models::Record;
use crate::utils::date::{month_key, parse_date, week_key};
use crate::utils::time::time_to_minutes;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotal {
    pub period: String,
    pub minutes: i64,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub name: String,
    pub minutes: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub previous: i64,
    pub current: i64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Productivity {
    pub total_minutes: i64,
    pub active_days: usize,
    pub average_per_active_day: f64,
    pub completed_records: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub records: usize,
    pub sessions: usize,
    pub total_minutes: i64,
    pub problem_sessions: usize,
    pub conflicts: usize,
    pub duplicate_groups: usize,
}

pub const HISTOGRAM_LABELS: [&str; 5] = ["<15m", "15-30m", "30-60m", "1-2h", ">2h"];

/// `(date, minutes, start, end)` for every countable entry.
struct Slice<'a> {
    date: NaiveDate,
    minutes: i64,
    start: &'a str,
    end: &'a str,
}

fn slices(records: &[Record]) -> Vec<Slice<'_>> {
    let mut out = Vec::new();

    for r in records.iter().filter(|r| r.is_active()) {
        if r.sessions.is_empty() {
            if let Some(date) = parse_date(&r.date) {
                out.push(Slice {
                    date,
                    minutes: r.duration_minutes,
                    start: &r.start_time,
                    end: &r.end_time,
                });
            }
            continue;
        }

        for s in &r.sessions {
            if let Some(date) = parse_date(s.effective_date(&r.date)) {
                out.push(Slice {
                    date,
                    minutes: s.duration_minutes,
                    start: &s.start_time,
                    end: &s.end_time,
                });
            }
        }
    }

    out
}

fn totals_by<F>(records: &[Record], key: F) -> Vec<PeriodTotal>
where
    F: Fn(NaiveDate) -> String,
{
    let mut map: BTreeMap<String, (i64, usize)> = BTreeMap::new();
    for s in slices(records) {
        let e = map.entry(key(s.date)).or_default();
        e.0 += s.minutes;
        e.1 += 1;
    }

    map.into_iter()
        .map(|(period, (minutes, sessions))| PeriodTotal {
            period,
            minutes,
            sessions,
        })
        .collect()
}

pub fn daily_totals(records: &[Record]) -> Vec<PeriodTotal> {
    totals_by(records, |d| d.format("%Y-%m-%d").to_string())
}

pub fn weekly_totals(records: &[Record]) -> Vec<PeriodTotal> {
    totals_by(records, week_key)
}

pub fn monthly_totals(records: &[Record]) -> Vec<PeriodTotal> {
    totals_by(records, month_key)
}

fn breakdown_by<F>(records: &[Record], name: F) -> Vec<Breakdown>
where
    F: Fn(&Record) -> &str,
{
    let mut map: HashMap<String, i64> = HashMap::new();
    for r in records.iter().filter(|r| r.is_active()) {
        let n = name(r).trim();
        let n = if n.is_empty() { "(none)" } else { n };
        let minutes = if r.sessions.is_empty() {
            r.duration_minutes
        } else {
            r.session_minutes()
        };
        *map.entry(n.to_string()).or_default() += minutes;
    }

    let total: i64 = map.values().sum();
    let mut out: Vec<Breakdown> = map
        .into_iter()
        .map(|(name, minutes)| Breakdown {
            name,
            minutes,
            percent: if total > 0 {
                minutes as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    out.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));
    out
}

pub fn category_breakdown(records: &[Record]) -> Vec<Breakdown> {
    breakdown_by(records, |r| r.category_name.as_str())
}

pub fn work_breakdown(records: &[Record]) -> Vec<Breakdown> {
    breakdown_by(records, |r| r.work_name.as_str())
}

fn bucket_index(minutes: i64) -> usize {
    match minutes {
        m if m < 15 => 0,
        m if m < 30 => 1,
        m if m < 60 => 2,
        m if m < 120 => 3,
        _ => 4,
    }
}

/// Closed-session counts per duration bucket (`<15m` .. `>2h`).
pub fn duration_histogram(records: &[Record]) -> Vec<HistogramBucket> {
    let mut counts = [0usize; 5];
    for r in records.iter().filter(|r| r.is_active()) {
        for s in r.sessions.iter().filter(|s| s.has_times()) {
            counts[bucket_index(s.duration_minutes)] += 1;
        }
    }

    HISTOGRAM_LABELS
        .into_iter()
        .zip(counts)
        .map(|(label, count)| HistogramBucket { label, count })
        .collect()
}

/// Minutes per weekday, Monday first.
pub fn weekday_heatmap(records: &[Record]) -> [i64; 7] {
    let mut out = [0i64; 7];
    for s in slices(records) {
        out[s.date.weekday().num_days_from_monday() as usize] += s.minutes;
    }
    out
}

/// Minutes per hour of day, spread over the hours each session covers.
pub fn hour_heatmap(records: &[Record]) -> [i64; 24] {
    let mut out = [0i64; 24];
    for s in slices(records) {
        if s.start.is_empty() || s.end.is_empty() {
            continue;
        }
        let (start, end) = (time_to_minutes(s.start), time_to_minutes(s.end).min(24 * 60));
        let mut t = start;
        while t < end {
            let hour_end = ((t / 60) + 1) * 60;
            let chunk_end = hour_end.min(end);
            out[(t / 60) as usize] += chunk_end - t;
            t = chunk_end;
        }
    }
    out
}

fn active_days(records: &[Record]) -> BTreeSet<NaiveDate> {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for s in slices(records) {
        *per_day.entry(s.date).or_default() += s.minutes;
    }
    per_day
        .into_iter()
        .filter(|(_, m)| *m > 0)
        .map(|(d, _)| d)
        .collect()
}

/// Current and longest runs of consecutive active days.
///
/// The current streak is anchored at today when today is active, otherwise
/// at yesterday; if neither is active it is `0`.
pub fn streaks(records: &[Record], today: NaiveDate) -> Streaks {
    let days = active_days(records);

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for d in &days {
        run = match prev {
            Some(p) if *d - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*d);
    }

    let yesterday = today - Duration::days(1);
    let anchor = if days.contains(&today) {
        Some(today)
    } else if days.contains(&yesterday) {
        Some(yesterday)
    } else {
        None
    };

    let mut current = 0u32;
    if let Some(mut d) = anchor {
        while days.contains(&d) {
            current += 1;
            d -= Duration::days(1);
        }
    }

    Streaks { current, longest }
}

/// Period-over-period change in percent.
///
/// `0` when both are `0`, `100` when only the current period has time.
pub fn percent_change(previous: i64, current: i64) -> f64 {
    match (previous, current) {
        (0, 0) => 0.0,
        (0, _) => 100.0,
        (p, c) => (c - p) as f64 * 100.0 / p as f64,
    }
}

fn minutes_in(records: &[Record], from: NaiveDate, to: NaiveDate) -> i64 {
    slices(records)
        .iter()
        .filter(|s| s.date >= from && s.date <= to)
        .map(|s| s.minutes)
        .sum()
}

pub fn compare_periods(
    records: &[Record],
    previous: (NaiveDate, NaiveDate),
    current: (NaiveDate, NaiveDate),
) -> PeriodComparison {
    let prev = minutes_in(records, previous.0, previous.1);
    let cur = minutes_in(records, current.0, current.1);
    PeriodComparison {
        previous: prev,
        current: cur,
        change_percent: percent_change(prev, cur),
    }
}

pub fn productivity(records: &[Record], from: NaiveDate, to: NaiveDate) -> Productivity {
    let total_minutes = minutes_in(records, from, to);
    let active = active_days(records)
        .into_iter()
        .filter(|d| *d >= from && *d <= to)
        .count();

    let in_range: Vec<&Record> = records
        .iter()
        .filter(|r| r.is_active())
        .filter(|r| parse_date(&r.date).is_some_and(|d| d >= from && d <= to))
        .collect();
    let completed = in_range.iter().filter(|r| r.is_completed).count();

    Productivity {
        total_minutes,
        active_days: active,
        average_per_active_day: if active > 0 {
            total_minutes as f64 / active as f64
        } else {
            0.0
        },
        completed_records: completed,
        completion_rate: if in_range.is_empty() {
            0.0
        } else {
            completed as f64 * 100.0 / in_range.len() as f64
        },
    }
}

/// Headline numbers for the whole collection.
pub fn summarize(records: &[Record], today: NaiveDate) -> Summary {
    let live: Vec<&Record> = records.iter().filter(|r| r.is_active()).collect();
    Summary {
        records: live.len(),
        sessions: live.iter().map(|r| r.sessions.len()).sum(),
        total_minutes: slices(records).iter().map(|s| s.minutes).sum(),
        problem_sessions: problems::count_problem_sessions(records, today),
        conflicts: conflicts::count_conflicts(records),
        duplicate_groups: duplicates::count_duplicate_groups(records),
    }
}
