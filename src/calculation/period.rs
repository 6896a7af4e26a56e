//! Period calculation.
//!
//! This module walks every date of a range and runs the schedule resolver,
//! the punch aggregator and the hours calculator for each one, then sums
//! the days into a balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceSummary, BankHoursReport, DailyBankHoursEntry, DateRange, Employee, Holiday,
    MedicalCertificate, TimeRecord, Vacation,
};

use super::accumulate::accumulate;
use super::aggregation::{aggregate_day, group_records_by_day};
use super::hours::{HoursOptions, build_daily_entry, compute_day};
use super::schedule::resolve_schedule;

/// Default upper bound on the length of a calculated range.
pub const DEFAULT_MAX_RANGE_DAYS: i64 = 3660;

/// Everything known about one employee for a calculation.
#[derive(Debug, Clone, Copy)]
pub struct BankHoursInput<'a> {
    /// The employee whose balance is calculated.
    pub employee: &'a Employee,
    /// The employee's punches; records outside the range are ignored.
    pub records: &'a [TimeRecord],
    /// The employee's vacation requests.
    pub vacations: &'a [Vacation],
    /// The employee's medical certificates.
    pub certificates: &'a [MedicalCertificate],
    /// Organization holidays.
    pub holidays: &'a [Holiday],
}

/// Options of a period calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOptions {
    /// Options applied to each day.
    pub hours: HoursOptions,
    /// Longest accepted range in days, measured after clamping. `None`
    /// leaves the range unbounded.
    pub max_range_days: Option<i64>,
    /// Last date that is evaluated; later dates of the range are skipped.
    pub evaluate_until: Option<NaiveDate>,
}

impl Default for PeriodOptions {
    fn default() -> Self {
        Self {
            hours: HoursOptions::default(),
            max_range_days: Some(DEFAULT_MAX_RANGE_DAYS),
            evaluate_until: None,
        }
    }
}

/// The outcome of a period calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHoursCalculation {
    /// The dates actually evaluated, after clamping. `None` when no date of
    /// the requested range could be evaluated.
    pub evaluated_range: Option<DateRange>,
    /// Totals over the evaluated days.
    pub summary: BalanceSummary,
    /// One entry per evaluated date, in ascending order.
    pub days: Vec<DailyBankHoursEntry>,
}

impl BankHoursCalculation {
    /// Converts the calculation into the employee-facing report.
    pub fn into_report(self, detailed: bool) -> BankHoursReport {
        BankHoursReport::new(self.summary, detailed.then_some(self.days))
    }
}

/// Checks that `range` does not start after it ends.
///
/// # Errors
///
/// [`EngineError::InvalidDateRange`] when the range is inverted.
pub fn check_order(range: DateRange) -> EngineResult<()> {
    if range.start_date > range.end_date {
        return Err(EngineError::InvalidDateRange {
            start_date: range.start_date,
            end_date: range.end_date,
            message: "start date is after end date".to_string(),
        });
    }
    Ok(())
}

/// Checks that `range` is ordered and no longer than `max_range_days`.
///
/// # Errors
///
/// [`EngineError::InvalidDateRange`] when either check fails.
pub fn validate_range(range: DateRange, max_range_days: i64) -> EngineResult<()> {
    check_order(range)?;
    if range.len_days() > max_range_days {
        return Err(EngineError::InvalidDateRange {
            start_date: range.start_date,
            end_date: range.end_date,
            message: format!("range exceeds {} days", max_range_days),
        });
    }
    Ok(())
}

/// Calculates the bank of hours of an employee over `range`.
///
/// The range is clamped to start no earlier than the hire date and to end
/// no later than `options.evaluate_until`. A range that clamps to nothing
/// yields a balanced, empty calculation. The length limit applies to the
/// clamped range.
///
/// Totals are summed in minutes and converted to hours once.
///
/// # Errors
///
/// - [`EngineError::ValidationError`] when the employee id is empty.
/// - [`EngineError::InvalidDateRange`] when the range is inverted or the
///   clamped range is longer than `options.max_range_days`.
pub fn calculate_bank_hours(
    input: BankHoursInput<'_>,
    range: DateRange,
    options: PeriodOptions,
) -> EngineResult<BankHoursCalculation> {
    let employee = input.employee;
    if employee.employee_id.trim().is_empty() {
        return Err(EngineError::validation("employeeId", "must not be empty"));
    }
    check_order(range)?;

    let start = range.start_date.max(employee.hire_date);
    let end = options
        .evaluate_until
        .map_or(range.end_date, |until| range.end_date.min(until));

    if start > end {
        debug!(
            employee_id = %employee.employee_id,
            start_date = %range.start_date,
            end_date = %range.end_date,
            "No evaluable dates in range"
        );
        return Ok(BankHoursCalculation {
            evaluated_range: None,
            summary: BalanceSummary::default(),
            days: Vec::new(),
        });
    }

    let evaluated = DateRange::new(start, end);
    if let Some(max_range_days) = options.max_range_days {
        validate_range(evaluated, max_range_days)?;
    }

    let by_day = group_records_by_day(
        input
            .records
            .iter()
            .filter(|r| evaluated.contains_date(r.date())),
    );

    let capacity = evaluated.len_days() as usize;
    let mut days = Vec::with_capacity(capacity);
    let mut minutes = Vec::with_capacity(capacity);
    for date in evaluated.days() {
        let schedule = resolve_schedule(employee, date, input.holidays);
        let classification = aggregate_day(
            by_day.get(&date).into_iter().flatten().copied(),
            date,
            input.vacations,
            input.certificates,
        );
        let hours = compute_day(&classification, &schedule, options.hours);
        let entry = build_daily_entry(&classification, &schedule, &hours, options.hours);

        debug!(
            employee_id = %employee.employee_id,
            date = %date,
            status = ?entry.status,
            worked_hours = %entry.worked_hours,
            overtime_hours = %entry.overtime_hours,
            owed_hours = %entry.owed_hours,
            "Computed day"
        );
        days.push(entry);
        minutes.push(hours);
    }

    let summary = accumulate(&minutes);

    Ok(BankHoursCalculation {
        evaluated_range: Some(evaluated),
        summary,
        days,
    })
}
