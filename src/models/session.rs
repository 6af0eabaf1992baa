use crate::utils::time::{TimeRange, minutes_between};
use serde::{Deserialize, Serialize};

/// One timed interval of a record.
///
/// Dates and times are kept as raw strings: a malformed value must survive
/// loading so the problem detector can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// `YYYY-MM-DD`; `None` inherits the owning record's date.
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM` or `""`.
    #[serde(default)]
    pub start_time: String,
    /// `HH:MM`, or `""` while the timer is running.
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub duration_minutes: i64,
}

impl Session {
    /// Closed session; duration computed from the times.
    pub fn new(id: &str, date: Option<&str>, start: &str, end: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.map(str::to_string),
            start_time: start.to_string(),
            end_time: end.to_string(),
            duration_minutes: minutes_between(start, end),
        }
    }

    /// Running session (no end time yet).
    pub fn open(id: &str, date: Option<&str>, start: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.map(str::to_string),
            start_time: start.to_string(),
            end_time: String::new(),
            duration_minutes: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_empty()
    }

    pub fn has_times(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }

    /// Session date, falling back to the owning record's date.
    pub fn effective_date<'a>(&'a self, record_date: &'a str) -> &'a str {
        self.date.as_deref().unwrap_or(record_date)
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::from_strs(&self.start_time, &self.end_time)
    }
}
