//! Hours calculation.
//!
//! This module compares the minutes worked on a day against the minutes
//! the schedule expected and turns the difference into overtime or owed
//! minutes, then renders the result as a [`DailyBankHoursEntry`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyBankHoursEntry, DayStatus};

use super::aggregation::{DayClassification, DayKind};
use super::schedule::ResolvedSchedule;

/// How the tolerance window applies to a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceMode {
    /// Deviations inside the window are ignored; outside it the full
    /// deviation counts.
    #[default]
    Threshold,
    /// Only the part of the deviation beyond the window counts.
    Deductible,
}

/// Options that change how a day is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoursOptions {
    /// Tolerance semantics.
    #[serde(default)]
    pub tolerance_mode: ToleranceMode,
    /// Credit work on non-work days as overtime.
    #[serde(default)]
    pub credit_off_day_work: bool,
}

/// The minute totals of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayHours {
    /// Minutes the schedule expected.
    pub expected_minutes: i64,
    /// Minutes counted as worked.
    pub worked_minutes: i64,
    /// Minutes credited to the bank.
    pub overtime_minutes: i64,
    /// Minutes debited from the bank.
    pub owed_minutes: i64,
}

/// Converts whole minutes to hours rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use bank_hours_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(minutes_to_hours(540), Decimal::from(9));
/// assert_eq!(minutes_to_hours(20), Decimal::from_str("0.33").unwrap());
/// ```
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

/// Computes the minute totals of a classified day.
///
/// Leave days and non-work days are all zero, except that work on a
/// non-work day is credited as overtime when `credit_off_day_work` is set.
/// An absent work day owes the full expected duration.
pub fn compute_day(
    classification: &DayClassification,
    schedule: &ResolvedSchedule,
    options: HoursOptions,
) -> DayHours {
    match classification.kind {
        DayKind::Justified | DayKind::Vacation => DayHours::default(),
        _ if !schedule.is_work_day => {
            if options.credit_off_day_work && classification.kind == DayKind::Worked {
                DayHours {
                    expected_minutes: 0,
                    worked_minutes: classification.worked_minutes,
                    overtime_minutes: classification.worked_minutes,
                    owed_minutes: 0,
                }
            } else {
                DayHours::default()
            }
        }
        DayKind::Absent => DayHours {
            expected_minutes: schedule.expected_minutes,
            worked_minutes: 0,
            overtime_minutes: 0,
            owed_minutes: schedule.expected_minutes,
        },
        DayKind::Worked => {
            let expected = schedule.expected_minutes;
            let worked = classification.worked_minutes;
            let tolerance = i64::from(schedule.tolerance_minutes);
            let deviation = worked - expected;

            let counted = if deviation.abs() <= tolerance {
                0
            } else {
                match options.tolerance_mode {
                    ToleranceMode::Threshold => deviation,
                    ToleranceMode::Deductible => deviation - tolerance * deviation.signum(),
                }
            };

            DayHours {
                expected_minutes: expected,
                worked_minutes: worked,
                overtime_minutes: counted.max(0),
                owed_minutes: (-counted).max(0),
            }
        }
    }
}

/// Builds the reported entry of a classified day from its minute totals.
pub fn build_daily_entry(
    classification: &DayClassification,
    schedule: &ResolvedSchedule,
    hours: &DayHours,
    options: HoursOptions,
) -> DailyBankHoursEntry {
    let mut notes = classification.notes.clone();

    let status = match classification.kind {
        DayKind::Justified => DayStatus::Justified,
        DayKind::Vacation => DayStatus::Vacation,
        DayKind::Worked if schedule.is_work_day => DayStatus::Worked,
        DayKind::Absent if schedule.is_work_day => DayStatus::Absent,
        kind => {
            if let Some(reason) = &schedule.off_reason {
                notes.push(reason.clone());
            }
            if kind == DayKind::Worked {
                if options.credit_off_day_work {
                    notes.push("work on a day off credited as overtime".to_string());
                    DayStatus::Worked
                } else {
                    notes.push("punches on a day off are not counted".to_string());
                    DayStatus::DayOff
                }
            } else {
                DayStatus::DayOff
            }
        }
    };

    DailyBankHoursEntry {
        date: classification.date,
        status,
        expected_hours: minutes_to_hours(hours.expected_minutes),
        worked_hours: minutes_to_hours(hours.worked_minutes),
        overtime_hours: minutes_to_hours(hours.overtime_minutes),
        owed_hours: minutes_to_hours(hours.owed_minutes),
        incomplete: classification.incomplete && status == DayStatus::Worked,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::aggregation::DayPunches;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn work_day(expected_minutes: i64, tolerance_minutes: u32) -> ResolvedSchedule {
        ResolvedSchedule {
            date: make_date("2025-03-10"),
            expected_start: None,
            expected_end: None,
            lunch_start: None,
            lunch_end: None,
            tolerance_minutes,
            is_work_day: true,
            expected_minutes,
            off_reason: None,
        }
    }

    fn day_off() -> ResolvedSchedule {
        ResolvedSchedule {
            is_work_day: false,
            expected_minutes: 0,
            off_reason: Some("Sat is not a scheduled work day".to_string()),
            ..work_day(0, 10)
        }
    }

    fn classified(kind: DayKind, worked_minutes: i64) -> DayClassification {
        DayClassification {
            date: make_date("2025-03-10"),
            kind,
            punches: DayPunches::default(),
            worked_minutes,
            incomplete: false,
            notes: vec![],
        }
    }

    fn entry_for(
        classification: &DayClassification,
        schedule: &ResolvedSchedule,
        options: HoursOptions,
    ) -> DailyBankHoursEntry {
        let hours = compute_day(classification, schedule, options);
        build_daily_entry(classification, schedule, &hours, options)
    }

    // ==========================================================================
    // HC-001: worked exactly the expected hours
    // ==========================================================================
    #[test]
    fn test_hc_001_exact_day() {
        let hours = compute_day(
            &classified(DayKind::Worked, 540),
            &work_day(540, 10),
            HoursOptions::default(),
        );
        assert_eq!(hours.overtime_minutes, 0);
        assert_eq!(hours.owed_minutes, 0);
        assert_eq!(hours.worked_minutes, 540);
    }

    // ==========================================================================
    // HC-002: one hour late exit is one hour of overtime
    // ==========================================================================
    #[test]
    fn test_hc_002_overtime_beyond_tolerance() {
        let entry = entry_for(
            &classified(DayKind::Worked, 600),
            &work_day(540, 10),
            HoursOptions::default(),
        );
        assert_eq!(entry.status, DayStatus::Worked);
        assert_eq!(entry.worked_hours, dec("10"));
        assert_eq!(entry.expected_hours, dec("9"));
        assert_eq!(entry.overtime_hours, dec("1"));
        assert_eq!(entry.owed_hours, Decimal::ZERO);
    }

    // ==========================================================================
    // HC-003: deviations inside the tolerance band are ignored
    // ==========================================================================
    #[test]
    fn test_hc_003_inside_tolerance_band() {
        let schedule = work_day(540, 10);
        for worked in [530, 535, 545, 550] {
            let hours = compute_day(
                &classified(DayKind::Worked, worked),
                &schedule,
                HoursOptions::default(),
            );
            assert_eq!(hours.overtime_minutes, 0, "worked {}", worked);
            assert_eq!(hours.owed_minutes, 0, "worked {}", worked);
        }
    }

    // ==========================================================================
    // HC-004: short day beyond tolerance is owed in full
    // ==========================================================================
    #[test]
    fn test_hc_004_owed_threshold() {
        let hours = compute_day(
            &classified(DayKind::Worked, 500),
            &work_day(540, 10),
            HoursOptions::default(),
        );
        assert_eq!(hours.owed_minutes, 40);
        assert_eq!(hours.overtime_minutes, 0);
    }

    // ==========================================================================
    // HC-005: deductible mode counts only the excess over tolerance
    // ==========================================================================
    #[test]
    fn test_hc_005_deductible_mode() {
        let options = HoursOptions {
            tolerance_mode: ToleranceMode::Deductible,
            credit_off_day_work: false,
        };
        let over = compute_day(&classified(DayKind::Worked, 600), &work_day(540, 10), options);
        assert_eq!(over.overtime_minutes, 50);

        let under = compute_day(&classified(DayKind::Worked, 500), &work_day(540, 10), options);
        assert_eq!(under.owed_minutes, 30);
    }

    // ==========================================================================
    // HC-006: absent work day owes the expected hours
    // ==========================================================================
    #[test]
    fn test_hc_006_absent_owes_expected() {
        let entry = entry_for(
            &classified(DayKind::Absent, 0),
            &work_day(540, 10),
            HoursOptions::default(),
        );
        assert_eq!(entry.status, DayStatus::Absent);
        assert_eq!(entry.owed_hours, dec("9"));
        assert_eq!(entry.owed_hours, entry.expected_hours);
        assert_eq!(entry.overtime_hours, Decimal::ZERO);
    }

    // ==========================================================================
    // HC-007: leave days are all zero
    // ==========================================================================
    #[test]
    fn test_hc_007_leave_days_all_zero() {
        for kind in [DayKind::Vacation, DayKind::Justified] {
            let hours = compute_day(
                &classified(kind, 600),
                &work_day(540, 10),
                HoursOptions::default(),
            );
            assert_eq!(hours, DayHours::default());
        }
    }

    // ==========================================================================
    // HC-008: day off ignores punches by default
    // ==========================================================================
    #[test]
    fn test_hc_008_day_off_default() {
        let entry = entry_for(
            &classified(DayKind::Worked, 240),
            &day_off(),
            HoursOptions::default(),
        );
        assert_eq!(entry.status, DayStatus::DayOff);
        assert_eq!(entry.worked_hours, Decimal::ZERO);
        assert_eq!(entry.overtime_hours, Decimal::ZERO);
        assert_eq!(
            entry.notes,
            vec![
                "Sat is not a scheduled work day".to_string(),
                "punches on a day off are not counted".to_string(),
            ]
        );
    }

    // ==========================================================================
    // HC-009: day off work credited when enabled
    // ==========================================================================
    #[test]
    fn test_hc_009_day_off_credit() {
        let options = HoursOptions {
            tolerance_mode: ToleranceMode::Threshold,
            credit_off_day_work: true,
        };
        let entry = entry_for(&classified(DayKind::Worked, 240), &day_off(), options);
        assert_eq!(entry.status, DayStatus::Worked);
        assert_eq!(entry.overtime_hours, dec("4"));
        assert_eq!(entry.expected_hours, Decimal::ZERO);
    }

    #[test]
    fn test_absent_on_day_off_is_day_off() {
        let entry = entry_for(
            &classified(DayKind::Absent, 0),
            &day_off(),
            HoursOptions::default(),
        );
        assert_eq!(entry.status, DayStatus::DayOff);
        assert_eq!(entry.owed_hours, Decimal::ZERO);
    }

    #[test]
    fn test_minutes_to_hours_rounding() {
        assert_eq!(minutes_to_hours(0), Decimal::ZERO);
        assert_eq!(minutes_to_hours(90), dec("1.5"));
        assert_eq!(minutes_to_hours(-45), dec("-0.75"));
        assert_eq!(minutes_to_hours(1), dec("0.02"));
    }
}
