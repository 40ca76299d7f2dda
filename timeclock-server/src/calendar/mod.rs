//! Calendar projection
//!
//! Projects a month of attendance records onto a fixed 42-cell (6x7)
//! grid, Monday-first, padded with neighbour-month days. Padding cells
//! always carry [`DayStatus::None`] regardless of data - they are
//! visually de-emphasized, not null.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use shared::error::{AppError, AppResult};
use shared::models::Attendance;

use crate::stats::WorkingDays;
use crate::timesheet::{self, DayStatus};


/// 6 weeks x 7 days, always
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Day-of-month label
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub status: DayStatus,
}

/// Build the 42-cell grid for a month.
///
/// `records` are that month's attendance records for one employee;
/// records outside the month are ignored. Invalid year/month input is a
/// validation error.
pub fn month_grid(
    year: i32,
    month: u32,
    records: &[Attendance],
    today: NaiveDate,
    working: WorkingDays,
) -> AppResult<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("invalid month: {year}-{month:02}")))?;

    let by_date: HashMap<NaiveDate, &Attendance> =
        records.iter().map(|r| (r.date, r)).collect();

    let lead = first.weekday().num_days_from_monday() as i64;
    let grid_start = first - Duration::days(lead);

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for offset in 0..GRID_CELLS as i64 {
        let date = grid_start + Duration::days(offset);
        let is_current_month = date.year() == year && date.month() == month;

        // Neighbour-month padding is always None, whatever the data says.
        let status = if is_current_month {
            timesheet::classify_day(
                by_date.get(&date).copied(),
                date,
                today,
                working.contains(date.weekday()),
            )?
        } else {
            DayStatus::None
        };

        cells.push(CalendarCell {
            date,
            day: date.day(),
            is_current_month,
            is_today: date == today,
            status,
        });
    }

    Ok(cells)
}
