//! Vacation request and balance models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    /// Awaiting approval.
    Pending,
    /// Approved and not started yet.
    Approved,
    /// Refused by HR.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
    /// Approved and currently being taken.
    InProgress,
    /// Approved and already taken.
    Completed,
}

impl VacationStatus {
    /// Approved at any stage of its lifecycle.
    pub fn is_approved(&self) -> bool {
        matches!(
            self,
            VacationStatus::Approved | VacationStatus::InProgress | VacationStatus::Completed
        )
    }
}

/// Kind of vacation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationType {
    /// Regular annual vacation.
    Annual,
    /// Vacation days converted to pay.
    Sold,
    /// Company-wide collective vacation.
    Collective,
    /// Unpaid leave.
    Unpaid,
    /// Anything else.
    Other,
}

/// A vacation request of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacation {
    /// Unique identifier of the request.
    pub id: String,
    /// The requesting user.
    pub user_id: String,
    /// First day of vacation (inclusive).
    pub start_date: NaiveDate,
    /// Last day of vacation (inclusive).
    pub end_date: NaiveDate,
    /// Number of vacation days requested.
    pub days: u32,
    /// Kind of vacation.
    #[serde(rename = "type")]
    pub vacation_type: VacationType,
    /// Current status.
    pub status: VacationStatus,
}

impl Vacation {
    /// Returns true if the date lies within the vacation (inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Vacation day balance of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationBalance {
    /// Days earned over all completed acquisition periods.
    pub total_days: u32,
    /// Days taken or approved.
    pub used_days: u32,
    /// Days still available to request.
    pub available_days: u32,
    /// Days in requests awaiting approval.
    pub pending_days: u32,
    /// Date the available days must be taken by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_approved_statuses() {
        assert!(VacationStatus::Approved.is_approved());
        assert!(VacationStatus::InProgress.is_approved());
        assert!(VacationStatus::Completed.is_approved());
        assert!(!VacationStatus::Pending.is_approved());
        assert!(!VacationStatus::Rejected.is_approved());
        assert!(!VacationStatus::Cancelled.is_approved());
    }

    #[test]
    fn test_covers_is_inclusive() {
        let vacation = Vacation {
            id: "vac_001".to_string(),
            user_id: "usr_001".to_string(),
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 10),
            days: 10,
            vacation_type: VacationType::Annual,
            status: VacationStatus::Approved,
        };
        assert!(vacation.covers(date(2025, 7, 1)));
        assert!(vacation.covers(date(2025, 7, 10)));
        assert!(!vacation.covers(date(2025, 6, 30)));
        assert!(!vacation.covers(date(2025, 7, 11)));
    }

    #[test]
    fn test_deserialize_vacation() {
        let json = r#"{
            "id": "vac_002",
            "userId": "usr_001",
            "startDate": "2025-07-01",
            "endDate": "2025-07-15",
            "days": 15,
            "type": "ANNUAL",
            "status": "IN_PROGRESS"
        }"#;
        let vacation: Vacation = serde_json::from_str(json).unwrap();
        assert_eq!(vacation.status, VacationStatus::InProgress);
        assert_eq!(vacation.vacation_type, VacationType::Annual);
    }

    #[test]
    fn test_balance_omits_missing_expiry() {
        let balance = VacationBalance {
            total_days: 0,
            used_days: 0,
            available_days: 0,
            pending_days: 0,
            expires_at: None,
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["availableDays"], 0);
        assert!(json.get("expiresAt").is_none());
    }
}
