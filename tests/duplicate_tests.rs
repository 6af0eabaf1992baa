use rworklog::core::duplicates::{
    IdentityKey, KeyStrategy, find_duplicates, find_duplicates_by,
};
use rworklog::models::Record;

mod common;
use common::{rec, sess};

#[test]
fn test_groups_by_work_and_deal() {
    let records = vec![
        rec("r1", "2025-06-02", "A", "B", vec![sess("s1", "09:00", "10:00")]),
        rec("r2", "2025-06-01", "A", "B", vec![sess("s2", "11:00", "12:30")]),
        rec("r3", "2025-06-01", "A", "C", vec![sess("s3", "09:00", "10:00")]),
    ];

    let groups = find_duplicates(&records);
    assert_eq!(groups.len(), 1);

    let g = &groups[0];
    assert_eq!(g.key, "A||B");
    assert_eq!(g.work_name, "A");
    assert_eq!(g.deal_name, "B");
    assert_eq!(g.len(), 2);
    assert_eq!(g.record_ids(), vec!["r2".to_string(), "r1".to_string()]);
    assert_eq!(g.total_sessions, 2);
    assert_eq!(g.total_duration, 150);
    assert_eq!(g.date_range, "2025-06-01 ~ 2025-06-02");
}

#[test]
fn test_single_date_range_and_largest_group_first() {
    let records = vec![
        rec("r1", "2025-06-01", "X", "Y", vec![]),
        rec("r2", "2025-06-01", "X", "Y", vec![]),
        rec("r3", "2025-06-01", "A", "B", vec![]),
        rec("r4", "2025-06-01", "A", "B", vec![]),
        rec("r5", "2025-06-01", "A", "B", vec![]),
    ];

    let groups = find_duplicates(&records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "A||B");
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[1].key, "X||Y");
    assert_eq!(groups[1].date_range, "2025-06-01");
}

#[test]
fn test_deleted_records_are_excluded() {
    let mut deleted = rec("r2", "2025-06-01", "A", "B", vec![]);
    deleted.is_deleted = true;
    let records = vec![rec("r1", "2025-06-01", "A", "B", vec![]), deleted];

    assert!(find_duplicates(&records).is_empty());
}

#[test]
fn test_task_strategy_separates_distinct_tasks() {
    let mut r1 = rec("r1", "2025-06-01", "A", "B", vec![]);
    r1.task_name = "design".into();
    let mut r2 = rec("r2", "2025-06-01", "A", "B", vec![]);
    r2.task_name = "review".into();
    let records = vec![r1, r2];

    assert_eq!(find_duplicates(&records).len(), 1);
    assert!(find_duplicates_by(&records, &KeyStrategy::WorkDealTask).is_empty());
}

#[test]
fn test_date_strategy_and_custom_key() {
    let records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![]),
        rec("r2", "2025-06-02", "A", "B", vec![]),
        rec("r3", "2025-06-02", "a", "other", vec![]),
    ];

    assert!(find_duplicates_by(&records, &KeyStrategy::WorkDealDate).is_empty());
    assert_eq!(KeyStrategy::WorkDealDate.key(&records[0]), "A||B||2025-06-01");

    let by_work_lowercase = |r: &Record| r.work_name.to_lowercase();
    let groups = find_duplicates_by(&records, &by_work_lowercase);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
}
