use rworklog::core::conflicts::{conflict_record_ids, count_conflicts, find_conflicts};
use rworklog::models::Session;

mod common;
use common::{rec, sess, sess_on};

#[test]
fn test_touching_sessions_do_not_conflict() {
    let records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "12:00")]),
        rec("r2", "2025-06-01", "C", "D", vec![sess("s2", "12:00", "14:00")]),
    ];
    assert!(find_conflicts(&records).is_empty());
}

#[test]
fn test_overlap_magnitude() {
    let records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "12:00")]),
        rec("r2", "2025-06-01", "C", "D", vec![sess("s2", "11:00", "14:00")]),
    ];

    let conflicts = find_conflicts(&records);
    assert_eq!(conflicts.len(), 1);

    let c = &conflicts[0];
    assert_eq!(c.date, "2025-06-01");
    assert_eq!(c.overlap_minutes, 60);
    assert_eq!(c.session1.session.id, "s1");
    assert_eq!(c.session2.session.id, "s2");
    assert_eq!(c.session2.record_id, "r2");
}

#[test]
fn test_three_mutual_overlaps_give_three_pairs() {
    let records = vec![rec(
        "r1",
        "2025-06-01",
        "A",
        "B",
        vec![
            sess("s1", "09:00", "12:00"),
            sess("s2", "10:00", "13:00"),
            sess("s3", "11:00", "14:00"),
        ],
    )];

    let conflicts = find_conflicts(&records);
    assert_eq!(conflicts.len(), 3);
    assert_eq!(count_conflicts(&records), 3);

    let overlaps: Vec<i64> = conflicts.iter().map(|c| c.overlap_minutes).collect();
    assert_eq!(overlaps, vec![120, 60, 120]);
}

#[test]
fn test_sessions_on_different_dates_never_conflict() {
    let records = vec![rec(
        "r1",
        "2025-06-01",
        "A",
        "B",
        vec![
            sess("s1", "09:00", "12:00"),
            sess_on("s2", "2025-06-02", "09:00", "12:00"),
        ],
    )];
    assert!(find_conflicts(&records).is_empty());
}

#[test]
fn test_session_date_overrides_record_date() {
    let records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess_on("s1", "2025-06-02", "09:00", "10:00")]),
        rec("r2", "2025-06-02", "C", "D", vec![sess("s2", "09:30", "10:30")]),
    ];
    let conflicts = find_conflicts(&records);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].date, "2025-06-02");
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn test_deleted_and_open_sessions_are_ignored() {
    let mut deleted = rec("r2", "2025-06-01", "C", "D", vec![sess("s2", "09:00", "12:00")]);
    deleted.is_deleted = true;

    let records = vec![
        rec(
            "r1",
            "2025-06-01",
            "A",
            "B",
            vec![
                sess("s1", "09:00", "12:00"),
                Session::open("s3", None, "10:00"),
            ],
        ),
        deleted,
    ];
    assert!(find_conflicts(&records).is_empty());
}

#[test]
fn test_conflict_record_ids_for_a_date() {
    let records = vec![
        rec("r1", "2025-06-01", "A", "B", vec![sess("s1", "09:00", "12:00")]),
        rec("r2", "2025-06-01", "A", "B", vec![sess("s2", "11:00", "13:00")]),
        rec("r3", "2025-06-01", "C", "D", vec![sess("s3", "12:30", "14:00")]),
    ];
    let conflicts = find_conflicts(&records);
    assert_eq!(conflicts.len(), 2);
    assert_eq!(
        conflict_record_ids(&conflicts, "2025-06-01"),
        vec!["r1".to_string(), "r2".to_string(), "r3".to_string()]
    );
    assert!(conflict_record_ids(&conflicts, "2025-06-02").is_empty());
}
