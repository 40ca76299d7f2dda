use super::*;
use shared::models::{Attendance, AttendanceStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(employee: &str, day: NaiveDate, status: AttendanceStatus, hours: f64) -> Attendance {
    Attendance {
        id: format!("{employee}-{day}"),
        organization_id: "org".into(),
        employee_id: employee.into(),
        date: day,
        check_in: None,
        check_out: None,
        worked_hours: hours,
        overtime_hours: 0.0,
        status,
        notes: None,
        location: None,
        breaks: vec![],
    }
}

// ── rate guards ─────────────────────────────────────────────────────

#[test]
fn test_rates_are_zero_for_zero_denominator() {
    assert_eq!(attendance_rate(7, 0), 0.0);
    assert_eq!(punctuality_rate(3, 0), 0.0);
    assert_eq!(absenteeism_rate(2, 0), 0.0);
    assert_eq!(average_hours(40.0, 0), 0.0);
}

#[test]
fn test_rate_values() {
    assert_eq!(attendance_rate(7, 10), 70.0);
    assert_eq!(punctuality_rate(2, 3), 66.67);
    assert_eq!(absenteeism_rate(1, 8), 12.5);
    assert_eq!(average_hours(25.5, 3), 8.5);
}

// ── expected_working_days ───────────────────────────────────────────

#[test]
fn test_default_mask_counts_weekdays_only() {
    // 2026-03-02 is a Monday; two full weeks = 10 weekdays
    let days = expected_working_days(date(2026, 3, 2), date(2026, 3, 15), WorkingDays::default());
    assert_eq!(days, 10);
}

#[test]
fn test_bounds_are_inclusive() {
    let monday = date(2026, 3, 2);
    assert_eq!(expected_working_days(monday, monday, WorkingDays::default()), 1);
}

#[test]
fn test_inverted_range_is_empty() {
    assert_eq!(
        expected_working_days(date(2026, 3, 10), date(2026, 3, 2), WorkingDays::default()),
        0
    );
}

#[test]
fn test_six_day_week_includes_saturday() {
    let mask = WorkingDays::from_days_per_week(6);
    // Mon 2026-03-02 .. Sun 2026-03-08
    assert_eq!(expected_working_days(date(2026, 3, 2), date(2026, 3, 8), mask), 6);
    assert!(mask.contains(Weekday::Sat));
    assert!(!mask.contains(Weekday::Sun));
}

// ── grouping ────────────────────────────────────────────────────────

#[test]
fn test_group_by_department_empty_input() {
    let grouped = group_by_department(&[], &HashMap::new());
    assert!(grouped.is_empty());
}

#[test]
fn test_group_by_department_partitions_and_rates() {
    let dept_of: HashMap<String, String> = [
        ("e1".to_string(), "eng".to_string()),
        ("e2".to_string(), "eng".to_string()),
    ]
    .into();

    let records = vec![
        record("e1", date(2026, 3, 2), AttendanceStatus::Present, 8.0),
        record("e2", date(2026, 3, 2), AttendanceStatus::Late, 7.0),
        record("e3", date(2026, 3, 2), AttendanceStatus::Present, 6.0),
    ];
    let grouped = group_by_department(&records, &dept_of);
    assert_eq!(grouped.len(), 2);

    let (key, eng) = &grouped[0];
    assert_eq!(key, "eng");
    assert_eq!(eng.present_days, 2);
    assert_eq!(eng.late_days, 1);
    assert_eq!(eng.punctuality_rate, 50.0);
    assert_eq!(eng.average_hours, 7.5);

    let (key, unassigned) = &grouped[1];
    assert_eq!(key, "unassigned");
    assert_eq!(unassigned.present_days, 1);
}

#[test]
fn test_group_by_week_keys_on_monday_in_first_occurrence_order() {
    let records = vec![
        // Week of 2026-03-09 appears first in the input
        record("e1", date(2026, 3, 11), AttendanceStatus::Present, 8.0),
        record("e1", date(2026, 3, 3), AttendanceStatus::Present, 8.0),
        record("e1", date(2026, 3, 13), AttendanceStatus::Present, 8.0),
    ];
    let grouped = group_by_week(&records);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].0, date(2026, 3, 9));
    assert_eq!(grouped[0].1.present_days, 2);
    assert_eq!(grouped[1].0, date(2026, 3, 2));
    assert_eq!(grouped[1].1.present_days, 1);
}

#[test]
fn test_summarize_skips_absent_and_excused() {
    let records = vec![
        record("e1", date(2026, 3, 2), AttendanceStatus::Present, 8.0),
        record("e2", date(2026, 3, 2), AttendanceStatus::Absent, 0.0),
        record("e3", date(2026, 3, 2), AttendanceStatus::SickLeave, 0.0),
        record("e4", date(2026, 3, 2), AttendanceStatus::Remote, 7.5),
    ];
    let stats = summarize(&records);
    assert_eq!(stats.present_days, 2);
    assert_eq!(stats.total_hours, 15.5);
}
