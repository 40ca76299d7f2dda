//! Attendance model
//!
//! One record per employee per calendar date; the uniqueness is enforced
//! by an idempotent upsert keyed on `(employee_id, date)` at the data
//! layer. Timestamps are UTC instants; the organization timezone is
//! applied only for day boundaries and display.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Attendance status tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Remote,
    Overtime,
    SickLeave,
    Vacation,
}

impl AttendanceStatus {
    /// Statuses that count as a present day for statistics
    pub fn is_present(self) -> bool {
        matches!(
            self,
            AttendanceStatus::Present
                | AttendanceStatus::Late
                | AttendanceStatus::Remote
                | AttendanceStatus::Overtime
        )
    }

    /// Excused absences (sick leave, vacation) are not counted absent
    pub fn is_excused(self) -> bool {
        matches!(self, AttendanceStatus::SickLeave | AttendanceStatus::Vacation)
    }
}

/// Break kind tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    Lunch,
    Coffee,
    Personal,
    Other,
}

/// A start/end pair within a day, excluded from worked hours
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakInterval {
    pub start: DateTime<Utc>,
    /// `None` while the break is in progress
    pub end: Option<DateTime<Utc>>,
    pub break_type: BreakType,
}

/// Optional check-in location payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Attendance record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub organization_id: String,
    pub employee_id: String,
    /// Calendar date in the organization timezone; unique per employee
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub worked_hours: f64,
    #[serde(default)]
    pub overtime_hours: f64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub location: Option<GeoLocation>,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
}

impl Attendance {
    /// The break currently in progress, if any
    pub fn open_break(&self) -> Option<&BreakInterval> {
        self.breaks.iter().find(|b| b.end.is_none())
    }

    /// Checked in with no check-out yet
    pub fn in_progress(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

/// Patch for an attendance record
///
/// Used by the check-out / break flows and by admin edits; `None` fields
/// are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaks: Option<Vec<BreakInterval>>,
}
