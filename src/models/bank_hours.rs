//! Bank of hours result models.
//!
//! This module contains the derived, never persisted, outputs of a bank of
//! hours calculation: the per-day [`DailyBankHoursEntry`], the
//! [`BalanceSummary`] totals, the [`BankHoursReport`] returned to an
//! employee, and the [`BankHoursData`] rows of the admin view.
//!
//! Hours travel as JSON numbers rounded to two decimal places.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a calendar day was classified for hours accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    /// Punches with an ENTRY were recorded.
    Worked,
    /// Scheduled work day without punches or leave.
    Absent,
    /// Excused by an ABSENCE_JUSTIFIED punch or an approved certificate.
    Justified,
    /// Covered by an approved vacation.
    Vacation,
    /// Not a work day: outside the schedule, a holiday, or before hiring.
    DayOff,
}

/// The bank of hours outcome for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBankHoursEntry {
    /// The calendar date.
    pub date: NaiveDate,
    /// Day classification.
    pub status: DayStatus,
    /// Hours the schedule expected.
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_hours: Decimal,
    /// Hours derived from the punches.
    #[serde(with = "rust_decimal::serde::float")]
    pub worked_hours: Decimal,
    /// Hours credited to the bank.
    #[serde(with = "rust_decimal::serde::float")]
    pub overtime_hours: Decimal,
    /// Hours debited from the bank.
    #[serde(with = "rust_decimal::serde::float")]
    pub owed_hours: Decimal,
    /// True when a punch pair was missing.
    #[serde(default)]
    pub incomplete: bool,
    /// Explanations of anything unusual about the day.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Bank of hours totals over a set of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    /// Sum of overtime hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_overtime_hours: Decimal,
    /// Sum of owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owed_hours: Decimal,
    /// Overtime minus owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_hours: Decimal,
}

/// The response of the employee bank of hours query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankHoursReport {
    /// Sum of overtime hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_overtime_hours: Decimal,
    /// Sum of owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owed_hours: Decimal,
    /// Overtime minus owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_hours: Decimal,
    /// Per-day breakdown, present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<DailyBankHoursEntry>>,
}

impl BankHoursReport {
    /// Builds a report from totals and an optional day breakdown.
    pub fn new(summary: BalanceSummary, days: Option<Vec<DailyBankHoursEntry>>) -> Self {
        Self {
            total_overtime_hours: summary.total_overtime_hours,
            total_owed_hours: summary.total_owed_hours,
            balance_hours: summary.balance_hours,
            days,
        }
    }
}

/// Sign of a bank of hours balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceStatus {
    /// More overtime than owed hours.
    Positive,
    /// More owed hours than overtime.
    Negative,
    /// Exactly even.
    Balanced,
}

impl BalanceStatus {
    /// Classifies a balance by its sign.
    pub fn from_balance(balance_hours: Decimal) -> Self {
        if balance_hours > Decimal::ZERO {
            BalanceStatus::Positive
        } else if balance_hours < Decimal::ZERO {
            BalanceStatus::Negative
        } else {
            BalanceStatus::Balanced
        }
    }
}

/// One employee row of the admin bank of hours view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankHoursData {
    /// Employee registration number.
    pub employee_id: String,
    /// Linked user account.
    pub user_id: String,
    /// Full name.
    pub name: String,
    /// Department.
    pub department: String,
    /// Job position.
    pub position: String,
    /// Cost center, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Client allocation, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Sum of overtime hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_overtime_hours: Decimal,
    /// Sum of owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owed_hours: Decimal,
    /// Overtime minus owed hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_hours: Decimal,
    /// Sign of the balance.
    pub status: BalanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_balance_status_from_sign() {
        assert_eq!(BalanceStatus::from_balance(dec("1.5")), BalanceStatus::Positive);
        assert_eq!(BalanceStatus::from_balance(dec("-0.25")), BalanceStatus::Negative);
        assert_eq!(BalanceStatus::from_balance(Decimal::ZERO), BalanceStatus::Balanced);
    }

    #[test]
    fn test_report_serializes_hours_as_numbers() {
        let report = BankHoursReport::new(
            BalanceSummary {
                total_overtime_hours: dec("2.5"),
                total_owed_hours: dec("9"),
                balance_hours: dec("-6.5"),
            },
            None,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalOvertimeHours"], serde_json::json!(2.5));
        assert_eq!(json["totalOwedHours"], serde_json::json!(9.0));
        assert_eq!(json["balanceHours"], serde_json::json!(-6.5));
        assert!(json.get("days").is_none());
    }

    #[test]
    fn test_entry_wire_names() {
        let entry = DailyBankHoursEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            status: DayStatus::DayOff,
            expected_hours: Decimal::ZERO,
            worked_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            owed_hours: Decimal::ZERO,
            incomplete: false,
            notes: vec!["holiday: Carnaval".to_string()],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "DAY_OFF");
        assert_eq!(json["expectedHours"], serde_json::json!(0.0));
        assert_eq!(json["notes"][0], "holiday: Carnaval");
    }
}
