use rworklog::utils::date::{parse_period, previous_range};
use rworklog::utils::time::{
    DurationFormat, TimeRange, do_time_ranges_overlap, format_duration, is_valid_time,
    minutes_to_time, overlap_minutes, time_to_minutes,
};

mod common;
use common::day;

#[test]
fn test_time_to_minutes_parses_short_and_long_forms() {
    assert_eq!(time_to_minutes("09:30"), 570);
    assert_eq!(time_to_minutes("9:30"), 570);
    assert_eq!(time_to_minutes("23:59"), 1439);
    assert_eq!(time_to_minutes("00:00"), 0);
}

#[test]
fn test_time_to_minutes_malformed_is_zero() {
    assert_eq!(time_to_minutes(""), 0);
    assert_eq!(time_to_minutes("abc"), 0);
    assert_eq!(time_to_minutes("12"), 0);
    assert_eq!(time_to_minutes("ab:30"), 0);
}

#[test]
fn test_minutes_to_time_pads_and_folds_negative() {
    assert_eq!(minutes_to_time(0), "00:00");
    assert_eq!(minutes_to_time(65), "01:05");
    assert_eq!(minutes_to_time(-65), "01:05");
}

#[test]
fn test_extreme_minutes_do_not_overflow() {
    assert_eq!(minutes_to_time(i64::MIN), "153722867280912930:08");
    assert_eq!(
        format_duration(i64::MIN, DurationFormat::Minutes),
        "-9223372036854775808 min"
    );
}

#[test]
fn test_round_trip_whole_day() {
    for m in 0..1440 {
        assert_eq!(time_to_minutes(&minutes_to_time(m)), m, "minute {}", m);
    }
}

#[test]
fn test_overlap_is_half_open_and_symmetric() {
    let morning = TimeRange::from_strs("09:00", "12:00");
    let afternoon = TimeRange::from_strs("12:00", "14:00");
    let late_morning = TimeRange::from_strs("11:00", "14:00");

    assert!(!do_time_ranges_overlap(morning, afternoon));
    assert!(!do_time_ranges_overlap(afternoon, morning));
    assert!(do_time_ranges_overlap(morning, late_morning));
    assert!(do_time_ranges_overlap(late_morning, morning));
    assert_eq!(overlap_minutes(morning, late_morning), 60);
    assert_eq!(overlap_minutes(morning, afternoon), 0);

    let ranges = [morning, afternoon, late_morning, TimeRange::new(600, 610)];
    for a in ranges {
        for b in ranges {
            assert_eq!(do_time_ranges_overlap(a, b), do_time_ranges_overlap(b, a));
        }
    }
}

#[test]
fn test_time_format_validation() {
    assert!(is_valid_time("09:00"));
    assert!(is_valid_time("9:00"));
    assert!(is_valid_time("23:59"));
    assert!(!is_valid_time("24:00"));
    assert!(!is_valid_time("12:60"));
    assert!(!is_valid_time("9:0"));
    assert!(!is_valid_time(""));
}

#[test]
fn test_format_duration_families() {
    assert_eq!(format_duration(125, DurationFormat::Hours), "2h 5m");
    assert_eq!(format_duration(120, DurationFormat::Hours), "2h");
    assert_eq!(format_duration(45, DurationFormat::Hours), "45m");
    assert_eq!(format_duration(0, DurationFormat::Hours), "0m");
    assert_eq!(format_duration(125, DurationFormat::Minutes), "125 min");
}

#[test]
fn test_period_parsing() {
    assert_eq!(
        parse_period("2025-02").unwrap(),
        (day("2025-02-01"), day("2025-02-28"))
    );
    assert_eq!(
        parse_period("2024").unwrap(),
        (day("2024-01-01"), day("2024-12-31"))
    );
    assert_eq!(
        parse_period("2025-01:2025-03").unwrap(),
        (day("2025-01-01"), day("2025-03-31"))
    );
    assert!(parse_period("2025-13").is_err());
    assert!(parse_period("2025-03:2025-01").is_err());
}

#[test]
fn test_previous_range_has_same_length() {
    let (from, to) = previous_range(day("2025-03-01"), day("2025-03-31"));
    assert_eq!(to, day("2025-02-28"));
    assert_eq!((to - from).num_days(), 30);
}
