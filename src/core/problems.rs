//! Per-session structural checks.

use crate::models::{ProblemKind, Record, Session, SessionProblem};
use crate::utils::time::{is_valid_time, time_to_minutes};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Classify one session.
///
/// Order: `missing_time` (short-circuits), `invalid_time`, `zero_duration`,
/// `future_time`. `record_date` is used when the session has no date of its own.
pub fn detect_session_problems(
    session: &Session,
    record_date: &str,
    today: NaiveDate,
) -> Vec<SessionProblem> {
    let mut problems = Vec::new();

    if !session.has_times() {
        let missing = match (session.start_time.is_empty(), session.end_time.is_empty()) {
            (true, true) => "start and end time are missing",
            (true, false) => "start time is missing",
            _ => "end time is missing",
        };
        problems.push(SessionProblem::new(ProblemKind::MissingTime, missing));
        return problems;
    }

    let bad: Vec<&str> = [&session.start_time, &session.end_time]
        .into_iter()
        .filter(|t| !is_valid_time(t))
        .map(String::as_str)
        .collect();
    if !bad.is_empty() {
        problems.push(SessionProblem::new(
            ProblemKind::InvalidTime,
            format!("invalid time format: {}", bad.join(", ")),
        ));
    }

    if time_to_minutes(&session.start_time) == time_to_minutes(&session.end_time) {
        problems.push(SessionProblem::new(
            ProblemKind::ZeroDuration,
            format!(
                "start and end are equal ({} - {})",
                session.start_time, session.end_time
            ),
        ));
    }

    // YYYY-MM-DD compares lexicographically in chronological order.
    let date = session.effective_date(record_date);
    let today = today.format("%Y-%m-%d").to_string();
    if date > today.as_str() {
        problems.push(SessionProblem::new(
            ProblemKind::FutureTime,
            format!("session date {} is after today ({})", date, today),
        ));
    }

    problems
}

/// Problems for every session of every non-deleted record, keyed by session id.
/// Sessions without problems are omitted.
pub fn find_problem_sessions(
    records: &[Record],
    today: NaiveDate,
) -> BTreeMap<String, Vec<SessionProblem>> {
    find_problem_sessions_with_active(records, today, None)
}

/// Like [`find_problem_sessions`], but the running session named by
/// `active_session_id` is not reported as `missing_time` while it is open.
pub fn find_problem_sessions_with_active(
    records: &[Record],
    today: NaiveDate,
    active_session_id: Option<&str>,
) -> BTreeMap<String, Vec<SessionProblem>> {
    let mut out = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_active()) {
        for session in &record.sessions {
            if session.is_open() && active_session_id == Some(session.id.as_str()) {
                continue;
            }

            let problems = detect_session_problems(session, &record.date, today);
            if !problems.is_empty() {
                out.insert(session.id.clone(), problems);
            }
        }
    }

    debug!("problem scan: {} session(s) flagged", out.len());
    out
}

pub fn count_problem_sessions(records: &[Record], today: NaiveDate) -> usize {
    find_problem_sessions(records, today).len()
}
