use chrono::{Datelike, Duration, IsoWeek, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// ISO week key, e.g. `2025-W07`.
pub fn week_key(d: NaiveDate) -> String {
    let w: IsoWeek = d.iso_week();
    format!("{}-W{:02}", w.year(), w.week())
}

/// Month key, e.g. `2025-07`.
pub fn month_key(d: NaiveDate) -> String {
    format!("{}-{:02}", d.year(), d.month())
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1).map(|d| d - Duration::days(1))
}

/// Resolve a single period token into an inclusive `(first, last)` date pair.
///
/// Accepted: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some(first) = parse_date(&format!("{}-01", p)) {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| format!("Invalid period: {}", p))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        if let (Some(f), Some(l)) = (first, last) {
            return Ok((f, l));
        }
    }

    Err(format!("Invalid period: {}", p))
}

/// Resolve `P` or `P:P` (see [`period_bounds`]) into an inclusive date range.
pub fn parse_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((start, end)) = p.split_once(':') {
        let (first, _) = period_bounds(start)?;
        let (_, last) = period_bounds(end)?;
        if last < first {
            return Err(format!("Invalid period (end before start): {}", p));
        }
        return Ok((first, last));
    }

    period_bounds(p)
}

/// First and last day of the month containing `d`.
pub fn month_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = d.with_day(1).unwrap_or(d);
    let last = last_day_of_month(d.year(), d.month()).unwrap_or(d);
    (first, last)
}

/// The equally long range immediately before `(from, to)`.
pub fn previous_range(from: NaiveDate, to: NaiveDate) -> (NaiveDate, NaiveDate) {
    let len = (to - from).num_days() + 1;
    let prev_to = from - Duration::days(1);
    let prev_from = prev_to - Duration::days(len - 1);
    (prev_from, prev_to)
}

/// Current local timestamp in RFC 3339, used for `deleted_at` / `completed_at`.
pub fn now_rfc3339() -> String {
    chrono::Local::now().to_rfc3339()
}
