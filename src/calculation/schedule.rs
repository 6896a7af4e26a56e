//! Work schedule resolution.
//!
//! This module resolves an employee's contracted schedule for a single
//! calendar date, deciding whether the date is a work day and how many
//! minutes of work it expects.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Employee, Holiday};

/// The schedule of an employee as it applies to one date.
///
/// When the date is not a work day `expected_minutes` is zero and
/// `off_reason` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchedule {
    /// The resolved date.
    pub date: NaiveDate,
    /// Expected start of the work day.
    pub expected_start: Option<NaiveDateTime>,
    /// Expected end of the work day.
    pub expected_end: Option<NaiveDateTime>,
    /// Expected start of lunch.
    pub lunch_start: Option<NaiveDateTime>,
    /// Expected end of lunch.
    pub lunch_end: Option<NaiveDateTime>,
    /// Grace window in minutes.
    pub tolerance_minutes: u32,
    /// Whether the date carries expected hours.
    pub is_work_day: bool,
    /// Minutes of work expected on the date.
    pub expected_minutes: i64,
    /// Why the date is not a work day.
    pub off_reason: Option<String>,
}

impl ResolvedSchedule {
    fn day_off(date: NaiveDate, tolerance_minutes: u32, reason: String) -> Self {
        Self {
            date,
            expected_start: None,
            expected_end: None,
            lunch_start: None,
            lunch_end: None,
            tolerance_minutes,
            is_work_day: false,
            expected_minutes: 0,
            off_reason: Some(reason),
        }
    }
}

/// Resolves the schedule of `employee` on `date`.
///
/// The resolver fails closed: an employee without a work schedule has no
/// work days, so no owed hours are ever fabricated against them. Dates
/// before the hire date and organization holidays are not work days
/// either.
///
/// # Examples
///
/// ```
/// use bank_hours_engine::calculation::resolve_schedule;
/// use bank_hours_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee: Employee = serde_json::from_str(r#"{
///     "employeeId": "EMP001",
///     "userId": "usr_001",
///     "hireDate": "2024-01-02"
/// }"#).unwrap();
///
/// let resolved = resolve_schedule(&employee, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), &[]);
/// assert!(!resolved.is_work_day);
/// assert_eq!(resolved.expected_minutes, 0);
/// ```
pub fn resolve_schedule(
    employee: &Employee,
    date: NaiveDate,
    holidays: &[Holiday],
) -> ResolvedSchedule {
    let tolerance_minutes = employee
        .work_schedule
        .as_ref()
        .map(|s| s.tolerance_minutes)
        .unwrap_or(0);

    if date < employee.hire_date {
        return ResolvedSchedule::day_off(
            date,
            tolerance_minutes,
            format!("before hire date {}", employee.hire_date),
        );
    }

    let Some(schedule) = employee.work_schedule.as_ref() else {
        return ResolvedSchedule::day_off(date, 0, "no work schedule".to_string());
    };

    if let Some(holiday) = holidays.iter().find(|h| h.date == date) {
        return ResolvedSchedule::day_off(
            date,
            tolerance_minutes,
            format!("holiday: {}", holiday.name),
        );
    }

    if !schedule.is_work_day(date.weekday()) {
        return ResolvedSchedule::day_off(
            date,
            tolerance_minutes,
            format!("{} is not a scheduled work day", date.weekday()),
        );
    }

    ResolvedSchedule {
        date,
        expected_start: Some(date.and_time(schedule.start_time)),
        expected_end: Some(date.and_time(schedule.end_time)),
        lunch_start: Some(date.and_time(schedule.lunch_start_time)),
        lunch_end: Some(date.and_time(schedule.lunch_end_time)),
        tolerance_minutes,
        is_work_day: true,
        expected_minutes: schedule.full_day_minutes(),
        off_reason: None,
    }
}
