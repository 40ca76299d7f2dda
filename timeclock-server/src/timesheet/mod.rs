//! Attendance time accounting
//!
//! Converts raw attendance records into derived time metrics: worked
//! hours, overtime, punctuality, and day classification. All functions
//! are pure; arithmetic runs on `Decimal` and is rounded to two decimal
//! places before leaving the module.
//!
//! Missing data has defined meaning (no check-out is an in-progress day,
//! not an error); malformed data (check-out before check-in, inverted
//! break intervals) fails loudly as a validation error.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Attendance, BreakInterval, WorkPolicy, WorkSchedule};

use crate::stats::WorkingDays;


/// Rounding for hour values (2 decimal places, half-up)
const HOUR_DECIMALS: u32 = 2;

const SECONDS_PER_HOUR: i64 = 3600;

/// Check-in classification against the scheduled start
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Punctuality {
    OnTime,
    Late,
}

/// Day classification for calendar rendering
///
/// The precedence Complete > Incomplete > Absent > None is load-bearing:
/// the calendar grid renders exactly this ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Both check-in and check-out recorded
    Complete,
    /// Check-in only (in progress, or never closed)
    Incomplete,
    /// No record on a past working day
    Absent,
    /// Future day, non-working day, or excused absence
    None,
}

fn round_hours(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(HOUR_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Total elapsed time between check-in and check-out minus closed break
/// durations, in hours rounded to two decimals; never negative.
///
/// A missing check-out means the day is still in progress and yields
/// `0.0` worked hours. A check-out at or before the check-in, or a break
/// whose end precedes its start, is malformed input and is rejected.
pub fn worked_hours(
    check_in: DateTime<Utc>,
    check_out: Option<DateTime<Utc>>,
    breaks: &[BreakInterval],
) -> AppResult<f64> {
    let Some(check_out) = check_out else {
        return Ok(0.0);
    };
    if check_out <= check_in {
        return Err(AppError::new(ErrorCode::CheckOutBeforeCheckIn)
            .with_detail("check_in", check_in.to_rfc3339())
            .with_detail("check_out", check_out.to_rfc3339()));
    }

    let mut break_seconds: i64 = 0;
    for interval in breaks {
        // An open break contributes nothing until it is closed.
        let Some(end) = interval.end else { continue };
        if end < interval.start {
            return Err(AppError::validation("break end precedes break start")
                .with_detail("break_start", interval.start.to_rfc3339()));
        }
        break_seconds += (end - interval.start).num_seconds();
    }

    let net_seconds = ((check_out - check_in).num_seconds() - break_seconds).max(0);
    Ok(round_hours(
        Decimal::from(net_seconds) / Decimal::from(SECONDS_PER_HOUR),
    ))
}

/// Hours beyond the standard daily schedule: `max(0, worked - standard)`
pub fn overtime_hours(worked: f64, standard_daily_hours: f64) -> f64 {
    let worked = Decimal::from_f64(worked).unwrap_or_default();
    let standard = Decimal::from_f64(standard_daily_hours).unwrap_or_default();
    let overtime = worked - standard;
    if overtime <= Decimal::ZERO {
        0.0
    } else {
        round_hours(overtime)
    }
}

/// Classify a check-in against the scheduled start plus grace threshold.
///
/// No scheduled start means there is no policy to violate: always
/// on-time. Comparison happens in the organization timezone.
pub fn classify_punctuality(
    check_in: DateTime<Utc>,
    scheduled_start: Option<NaiveTime>,
    late_threshold_minutes: u32,
    tz: Tz,
) -> Punctuality {
    let Some(start) = scheduled_start else {
        return Punctuality::OnTime;
    };
    let (deadline, wrapped) =
        start.overflowing_add_signed(Duration::minutes(late_threshold_minutes as i64));
    if wrapped != 0 {
        // Grace window crosses midnight; nothing that day can be late.
        return Punctuality::OnTime;
    }
    let local = check_in.with_timezone(&tz).time();
    if local <= deadline {
        Punctuality::OnTime
    } else {
        Punctuality::Late
    }
}

/// Classify a calendar day from its attendance record (if any).
///
/// Precedence: Complete (in + out) > Incomplete (in only) > Absent (no
/// record, working day, in the past) > None (future, non-working, or
/// excused). A record whose check-out precedes its check-in - or that
/// carries a check-out without a check-in - raises a validation error
/// instead of silently mis-classifying.
pub fn classify_day(
    record: Option<&Attendance>,
    date: NaiveDate,
    today: NaiveDate,
    is_working_day: bool,
) -> AppResult<DayStatus> {
    let Some(record) = record else {
        return Ok(classify_missing(date, today, is_working_day));
    };

    match (record.check_in, record.check_out) {
        (Some(check_in), Some(check_out)) => {
            if check_out <= check_in {
                return Err(AppError::new(ErrorCode::CheckOutBeforeCheckIn)
                    .with_detail("attendance_id", record.id.clone()));
            }
            Ok(DayStatus::Complete)
        }
        (Some(_), None) => Ok(DayStatus::Incomplete),
        (None, Some(_)) => Err(AppError::validation(
            "attendance record has a check-out without a check-in",
        )
        .with_detail("attendance_id", record.id.clone())),
        (None, None) => {
            if record.status.is_excused() {
                Ok(DayStatus::None)
            } else {
                Ok(classify_missing(date, today, is_working_day))
            }
        }
    }
}

fn classify_missing(date: NaiveDate, today: NaiveDate, is_working_day: bool) -> DayStatus {
    if is_working_day && date < today {
        DayStatus::Absent
    } else {
        DayStatus::None
    }
}

/// The schedule an employee is measured against: organization policy
/// with the per-employee override applied on top.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSchedule {
    /// `None` means no start to violate (no policy, or flexible hours)
    pub start_time: Option<NaiveTime>,
    pub standard_daily_hours: f64,
    pub late_threshold_minutes: u32,
    pub working_days: WorkingDays,
    pub allow_remote: bool,
    pub require_geolocation: bool,
    pub max_daily_hours: Option<f64>,
}

impl EffectiveSchedule {
    /// Resolve policy + override into the schedule to measure against.
    ///
    /// Without a policy there is nothing to be late against and eight
    /// standard hours apply. A flexible override clears the scheduled
    /// start entirely.
    pub fn resolve(policy: Option<&WorkPolicy>, schedule: Option<&WorkSchedule>) -> Self {
        let mut effective = match policy {
            Some(p) => Self {
                start_time: Some(p.start_time),
                standard_daily_hours: p.standard_daily_hours(),
                late_threshold_minutes: p.late_threshold_minutes,
                working_days: WorkingDays::from_days_per_week(p.working_days_per_week),
                allow_remote: p.allow_remote,
                require_geolocation: p.require_geolocation,
                max_daily_hours: (p.max_daily_hours > 0.0).then_some(p.max_daily_hours),
            },
            None => Self {
                start_time: None,
                standard_daily_hours: 8.0,
                late_threshold_minutes: 0,
                working_days: WorkingDays::default(),
                allow_remote: true,
                require_geolocation: false,
                max_daily_hours: None,
            },
        };

        if let Some(s) = schedule {
            effective.start_time = if s.flexible { None } else { Some(s.start_time) };
            effective.standard_daily_hours = s.hours_per_day;
            effective.working_days = WorkingDays::from_days_per_week(s.days_per_week);
        }

        effective
    }
}
