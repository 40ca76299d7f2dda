//! Statistics aggregation
//!
//! Reduces attendance records over a date range into summary statistics:
//! rates, averages, and week/department groupings. Every rate guards its
//! denominator - a zero expected count yields exactly `0.0`, never
//! NaN or infinity.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use shared::models::Attendance;

#[cfg(test)]
mod tests;

/// Working-day set as a weekday bitmask (bit 0 = Monday .. bit 6 = Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDays(u8);

impl WorkingDays {
    /// Monday through Friday
    pub const WEEKDAYS: WorkingDays = WorkingDays(0b0001_1111);

    /// Derive a working-day set from a days-per-week count, filling from
    /// Monday: 5 = Mon-Fri, 6 = Mon-Sat, 7 = every day.
    pub fn from_days_per_week(days: u8) -> Self {
        let days = days.clamp(1, 7) as u32;
        WorkingDays(((1u16 << days) - 1) as u8)
    }

    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self::WEEKDAYS
    }
}

fn pct(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round2(numerator as f64 / denominator as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of expected attendance that was present, as a percentage.
/// `0.0` when nothing was expected.
pub fn attendance_rate(present: u32, expected: u32) -> f64 {
    pct(present, expected)
}

/// Share of present days that were on time. `0.0` when nobody was present.
pub fn punctuality_rate(on_time: u32, present: u32) -> f64 {
    pct(on_time, present)
}

/// Share of expected working days with no attendance. `0.0` when nothing
/// was expected.
pub fn absenteeism_rate(absent: u32, expected: u32) -> f64 {
    pct(absent, expected)
}

/// Mean worked hours per present day. `0.0` when there were none.
pub fn average_hours(total_hours: f64, present_days: u32) -> f64 {
    if present_days == 0 {
        return 0.0;
    }
    round2(total_hours / present_days as f64)
}

/// Count calendar days between the bounds (inclusive) whose weekday is
/// in the working-day set.
pub fn expected_working_days(start: NaiveDate, end: NaiveDate, working: WorkingDays) -> u32 {
    if end < start {
        return 0;
    }
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if working.contains(day.weekday()) {
            count += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

/// Monday of the ISO week containing the date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Per-partition attendance summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub present_days: u32,
    pub on_time_days: u32,
    pub late_days: u32,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
    pub punctuality_rate: f64,
    pub average_hours: f64,
}

/// Summarize a set of records into counts and rates
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a Attendance>) -> PartitionStats {
    let mut stats = PartitionStats::default();
    for record in records {
        if !record.status.is_present() {
            continue;
        }
        stats.present_days += 1;
        if record.status == shared::models::AttendanceStatus::Late {
            stats.late_days += 1;
        } else {
            stats.on_time_days += 1;
        }
        stats.total_hours += record.worked_hours;
        stats.total_overtime_hours += record.overtime_hours;
    }
    stats.total_hours = round2(stats.total_hours);
    stats.total_overtime_hours = round2(stats.total_overtime_hours);
    stats.punctuality_rate = punctuality_rate(stats.on_time_days, stats.present_days);
    stats.average_hours = average_hours(stats.total_hours, stats.present_days);
    stats
}

/// Partition records by ISO week start (Monday).
///
/// Partition order is insertion order of first occurrence - callers
/// needing chronological order must sort by key explicitly.
pub fn group_by_week(records: &[Attendance]) -> Vec<(NaiveDate, PartitionStats)> {
    group_by(records, |record| week_start(record.date))
}

/// Partition records by department id, resolved through the
/// employee-to-department map. Employees without a department land in
/// the `"unassigned"` partition.
pub fn group_by_department(
    records: &[Attendance],
    department_of: &HashMap<String, String>,
) -> Vec<(String, PartitionStats)> {
    group_by(records, |record| {
        department_of
            .get(&record.employee_id)
            .cloned()
            .unwrap_or_else(|| "unassigned".to_string())
    })
}

fn group_by<K: Clone + PartialEq>(
    records: &[Attendance],
    key_of: impl Fn(&Attendance) -> K,
) -> Vec<(K, PartitionStats)> {
    // Insertion-ordered partitions; record sets per range are small
    // enough that a linear key scan beats hashing overhead.
    let mut keys: Vec<K> = Vec::new();
    let mut buckets: Vec<Vec<&Attendance>> = Vec::new();
    for record in records {
        let key = key_of(record);
        match keys.iter().position(|k| *k == key) {
            Some(i) => buckets[i].push(record),
            None => {
                keys.push(key);
                buckets.push(vec![record]);
            }
        }
    }
    keys.into_iter()
        .zip(buckets)
        .map(|(key, bucket)| (key, summarize(bucket)))
        .collect()
}
