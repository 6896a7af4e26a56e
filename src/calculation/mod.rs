//! Calculation logic for the Bank of Hours Engine.
//!
//! This module contains every step of the bank of hours calculation: work
//! schedule resolution, daily punch aggregation, the vacation and absence
//! offset, per-day hours, balance accumulation, and the period walk that
//! ties them together. It also holds the punch validator and the vacation
//! balance calculator.

mod accumulate;
mod aggregation;
mod hours;
mod leave;
mod period;
mod punch;
mod schedule;
mod vacation_balance;

pub use accumulate::accumulate;
pub use aggregation::{DayClassification, DayKind, DayPunches, aggregate_day, group_records_by_day};
pub use hours::{
    DayHours, HoursOptions, ToleranceMode, build_daily_entry, compute_day, minutes_to_hours,
};
pub use leave::{approved_certificate_on, approved_vacation_on};
pub use period::{
    BankHoursCalculation, BankHoursInput, DEFAULT_MAX_RANGE_DAYS, PeriodOptions,
    calculate_bank_hours, check_order, validate_range,
};
pub use punch::{PunchAttempt, PunchPolicy, validate_punch};
pub use schedule::{ResolvedSchedule, resolve_schedule};
pub use vacation_balance::{DEFAULT_DAYS_PER_PERIOD, calculate_vacation_balance};
