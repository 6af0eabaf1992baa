use rworklog::core::conflicts::count_conflicts;
use rworklog::core::duplicates::find_duplicates;
use rworklog::core::merge::{merge_duplicate_group, merge_group, plan_merge};
use rworklog::errors::AppError;
use rworklog::models::Record;

mod common;
use common::{rec, sess, sess_on};

const NOW: &str = "2025-06-20T10:00:00+02:00";

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_merge_conserves_sessions_and_recomputes_totals() {
    let mut stale = rec("r1", "2025-06-01", "A", "B", vec![sess("s2", "13:00", "14:00")]);
    stale.duration_minutes = 999; // stale total must not survive
    let mut records = vec![
        rec(
            "r2",
            "2025-06-02",
            "A",
            "B",
            vec![sess_on("s3", "2025-06-02", "09:00", "09:30")],
        ),
        stale,
        rec("r3", "2025-06-01", "A", "B", vec![sess("s1", "08:00", "10:00")]),
    ];

    let outcome = merge_group(&mut records, &ids(&["r1", "r2", "r3"]), NOW).unwrap();

    // r3 starts earliest on the earliest date
    assert_eq!(outcome.merged_id, "r3");
    let merged = records.iter().find(|r| r.id == outcome.merged_id).unwrap();
    let session_ids: Vec<&str> = merged.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(session_ids, vec!["s1", "s2", "s3"]);
    assert_eq!(merged.duration_minutes, 120 + 60 + 30);
    assert_eq!(merged.start_time, "08:00");
    assert_eq!(merged.end_time, "09:30");
    assert_eq!(merged.date, "2025-06-01");
    assert!(!merged.is_deleted);

    for r in records.iter().filter(|r| r.id != outcome.merged_id) {
        assert!(r.is_deleted, "{} should be soft-deleted", r.id);
        assert_eq!(r.deleted_at.as_deref(), Some(NOW));
    }
    assert_eq!(records.len(), 3);
    assert_eq!(outcome.session_count, 3);
}

#[test]
fn test_base_is_earliest_by_date_then_start_time() {
    let mut late = rec("r1", "2025-06-01", "A", "B", vec![]);
    late.start_time = "15:00".into();
    let mut early = rec("r2", "2025-06-01", "A", "B", vec![]);
    early.start_time = "08:00".into();

    let plan = plan_merge(&[late, early]).unwrap();
    assert_eq!(plan.merged.id, "r2");
    assert_eq!(plan.to_delete, vec!["r1".to_string()]);
    // no sessions: the base keeps its own boundaries
    assert_eq!(plan.merged.start_time, "08:00");
    assert_eq!(plan.merged.date, "2025-06-01");
}

#[test]
fn test_duplicate_session_ids_appear_once() {
    let shared = sess("s1", "09:00", "10:00");
    let mut records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![shared.clone()]),
        rec("r2", "2025-06-01", "A", "B", vec![shared, sess("s2", "11:00", "12:00")]),
    ];

    let outcome = merge_group(&mut records, &ids(&["r1", "r2"]), NOW).unwrap();
    assert_eq!(outcome.session_count, 2);
    assert_eq!(outcome.duration_minutes, 120);
}

#[test]
fn test_singleton_merge_is_a_no_op() {
    let original = rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "10:00")]);
    let mut records = vec![original.clone()];

    let outcome = merge_group(&mut records, &ids(&["r1"]), NOW).unwrap();
    assert!(outcome.deleted_ids.is_empty());
    assert_eq!(records, vec![original]);
}

#[test]
fn test_missing_ids_leave_collection_untouched() {
    let mut records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "10:00")]),
        rec("r2", "2025-06-01", "A", "B", vec![sess("s2", "10:00", "11:00")]),
    ];
    let before = records.clone();

    let err = merge_group(&mut records, &ids(&["r1", "r9"]), NOW).unwrap_err();
    match err {
        AppError::MergeGroupNotFound(missing) => assert_eq!(missing, vec!["r9".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(records, before);
}

#[test]
fn test_deleted_records_cannot_be_merged() {
    let mut gone = rec("r2", "2025-06-01", "A", "B", vec![]);
    gone.is_deleted = true;
    let mut records = vec![rec("r1", "2025-06-01", "A", "B", vec![]), gone];

    assert!(merge_group(&mut records, &ids(&["r1", "r2"]), NOW).is_err());
}

#[test]
fn test_divergent_metadata_is_reported() {
    let mut base = rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "10:00")]);
    base.category_name = "dev".into();
    let mut other = rec("r2", "2025-06-02", "A", "B", vec![sess("s2", "09:00", "10:00")]);
    other.category_name = "meetings".into();
    other.note = "from laptop".into();
    let mut records = vec![base, other];

    let outcome = merge_group(&mut records, &ids(&["r1", "r2"]), NOW).unwrap();
    assert_eq!(records[0].category_name, "dev");

    let fields: Vec<(&str, &str)> = outcome
        .dropped_metadata
        .iter()
        .map(|d| (d.field, d.value.as_str()))
        .collect();
    assert_eq!(fields, vec![("category_name", "meetings"), ("note", "from laptop")]);
}

#[test]
fn test_merging_a_duplicate_group_then_rescanning() {
    let mut records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "10:00")]),
        rec("r2", "2025-06-01", "A", "B", vec![sess_on("s2", "2025-06-01", "10:00", "11:00")]),
        rec("r3", "2025-06-01", "C", "D", vec![sess("s3", "09:00", "10:00")]),
    ];

    let groups = find_duplicates(&records);
    assert_eq!(groups.len(), 1);
    merge_duplicate_group(&mut records, &groups[0], NOW).unwrap();

    assert!(find_duplicates(&records).is_empty());
    let live: Vec<&Record> = records.iter().filter(|r| r.is_active()).collect();
    assert_eq!(live.len(), 2);
}

#[test]
fn test_empty_group_plans_nothing() {
    assert!(plan_merge(&[]).is_none());
    let mut records: Vec<Record> = Vec::new();
    assert!(merge_group(&mut records, &[], NOW).is_err());
}

#[test]
fn test_undated_sessions_keep_their_own_record_day() {
    let mut records = vec![
        rec("a", "2026-01-01", "A", "B", vec![sess("s1", "09:00", "10:00")]),
        rec("b", "2026-01-05", "A", "B", vec![sess("s2", "09:30", "10:30")]),
    ];
    assert_eq!(count_conflicts(&records), 0);

    merge_group(&mut records, &ids(&["a", "b"]), NOW).unwrap();

    let merged = records.iter().find(|r| r.id == "a").unwrap();
    let days: Vec<&str> = merged
        .sessions
        .iter()
        .map(|s| s.effective_date(&merged.date))
        .collect();
    assert_eq!(days, vec!["2026-01-01", "2026-01-05"]);
    // the base's own session still inherits
    assert_eq!(merged.sessions[0].date, None);
    assert_eq!(count_conflicts(&records), 0);
}

#[test]
fn test_single_digit_hours_order_numerically() {
    let plan = plan_merge(&[
        rec("r1", "2025-06-01", "A", "B", vec![sess("s2", "10:00", "11:00")]),
        rec("r2", "2025-06-01", "A", "B", vec![sess("s1", "9:30", "9:45")]),
    ])
    .unwrap();

    // r2 starts at 9:30, before 10:00
    assert_eq!(plan.merged.id, "r2");
    let order: Vec<&str> = plan.merged.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["s1", "s2"]);
    assert_eq!(plan.merged.start_time, "9:30");
    assert_eq!(plan.merged.end_time, "11:00");
    assert_eq!(plan.merged.duration_minutes, 75);
}
