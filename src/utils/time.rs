//! Time utilities: "HH:MM" <-> minutes conversions, range overlap, duration formatting.
//!
//! All helpers here are total: malformed input maps to a safe default
//! (`0` / `"00:00"`) and is left to the problem detector to classify.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex")
});

/// Parse `"H:MM"` / `"HH:MM"` into minutes since midnight.
/// Empty or malformed input yields `0`.
pub fn time_to_minutes(s: &str) -> i64 {
    let Some((h, m)) = s.trim().split_once(':') else {
        return 0;
    };

    match (h.parse::<u32>(), m.parse::<u32>()) {
        (Ok(h), Ok(m)) => i64::from(h) * 60 + i64::from(m),
        _ => 0,
    }
}

/// Inverse of [`time_to_minutes`], zero padded.
/// Negative values are folded to their absolute value.
pub fn minutes_to_time(mins: i64) -> String {
    let m = mins.unsigned_abs();
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Strict `HH:MM` (or `H:MM`) check, hours 0-23.
pub fn is_valid_time(s: &str) -> bool {
    TIME_RE.is_match(s)
}

/// Half-open `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn from_strs(start: &str, end: &str) -> Self {
        Self::new(time_to_minutes(start), time_to_minutes(end))
    }
}

/// `[a.start, a.end)` and `[b.start, b.end)` share at least one minute.
/// Touching boundaries (`a.end == b.start`) do not overlap.
pub fn do_time_ranges_overlap(a: TimeRange, b: TimeRange) -> bool {
    !(a.end <= b.start || a.start >= b.end)
}

/// Length of the shared part of two ranges, `0` when disjoint.
pub fn overlap_minutes(a: TimeRange, b: TimeRange) -> i64 {
    (a.end.min(b.end) - a.start.max(b.start)).max(0)
}

/// Minutes between two `HH:MM` strings, never negative.
pub fn minutes_between(start: &str, end: &str) -> i64 {
    (time_to_minutes(end) - time_to_minutes(start)).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFormat {
    /// Raw minutes, e.g. `"90 min"`.
    Minutes,
    /// Composite hours/minutes, e.g. `"1h 30m"`.
    #[default]
    Hours,
}

impl fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationFormat::Minutes => write!(f, "minutes"),
            DurationFormat::Hours => write!(f, "hours"),
        }
    }
}

/// Human readable duration.
///
/// `Hours` renders `"2h 5m"`, `"2h"` or `"5m"` (and `"0m"` for zero);
/// `Minutes` renders `"125 min"`.
pub fn format_duration(mins: i64, format: DurationFormat) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.unsigned_abs();

    match format {
        DurationFormat::Minutes => format!("{}{} min", sign, m),
        DurationFormat::Hours => {
            let (h, rest) = (m / 60, m % 60);
            match (h, rest) {
                (0, r) => format!("{}{}m", sign, r),
                (h, 0) => format!("{}{}h", sign, h),
                (h, r) => format!("{}{}h {}m", sign, h, r),
            }
        }
    }
}
