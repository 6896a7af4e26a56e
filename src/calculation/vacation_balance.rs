//! Vacation balance calculation.
//!
//! An employee earns `days_per_period` vacation days for every complete
//! year of employment. Unpaid leave is not drawn from the balance.

use chrono::{Months, NaiveDate};

use crate::models::{Employee, Vacation, VacationBalance, VacationStatus, VacationType};

/// Vacation days earned per complete acquisition period.
pub const DEFAULT_DAYS_PER_PERIOD: u32 = 30;

/// Calculates the vacation balance of `employee` as of `as_of`.
///
/// # Examples
///
/// ```
/// use bank_hours_engine::calculation::{DEFAULT_DAYS_PER_PERIOD, calculate_vacation_balance};
/// use bank_hours_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee: Employee = serde_json::from_str(r#"{
///     "employeeId": "EMP001",
///     "userId": "usr_001",
///     "hireDate": "2023-03-01"
/// }"#).unwrap();
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let balance = calculate_vacation_balance(&employee, &[], as_of, DEFAULT_DAYS_PER_PERIOD);
/// assert_eq!(balance.total_days, 60);
/// assert_eq!(balance.available_days, 60);
/// assert_eq!(balance.expires_at, NaiveDate::from_ymd_opt(2026, 3, 1));
/// ```
pub fn calculate_vacation_balance(
    employee: &Employee,
    vacations: &[Vacation],
    as_of: NaiveDate,
    days_per_period: u32,
) -> VacationBalance {
    let periods = as_of.years_since(employee.hire_date).unwrap_or(0);
    let total_days = periods.saturating_mul(days_per_period);

    let drawn = vacations
        .iter()
        .filter(|v| v.vacation_type != VacationType::Unpaid);
    let (used_days, pending_days) = drawn.fold((0u32, 0u32), |(used, pending), v| {
        if v.status.is_approved() {
            (used.saturating_add(v.days), pending)
        } else if v.status == VacationStatus::Pending {
            (used, pending.saturating_add(v.days))
        } else {
            (used, pending)
        }
    });

    let available_days = total_days
        .saturating_sub(used_days)
        .saturating_sub(pending_days);

    let expires_at = if periods >= 1 && available_days > 0 {
        employee
            .hire_date
            .checked_add_months(Months::new(12 * (periods + 1)))
    } else {
        None
    };

    VacationBalance {
        total_days,
        used_days,
        available_days,
        pending_days,
        expires_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_employee(hire_date: &str) -> Employee {
        Employee {
            employee_id: "EMP001".to_string(),
            user_id: "usr_001".to_string(),
            name: "Ana Souza".to_string(),
            department: "Operations".to_string(),
            position: "Analyst".to_string(),
            hire_date: make_date(hire_date),
            salary: None,
            work_schedule: None,
            is_remote: false,
            allowed_locations: vec![],
            cost_center: None,
            client: None,
        }
    }

    fn vacation(days: u32, vacation_type: VacationType, status: VacationStatus) -> Vacation {
        Vacation {
            id: format!("vac_{:?}_{}", status, days),
            user_id: "usr_001".to_string(),
            start_date: make_date("2025-01-06"),
            end_date: make_date("2025-01-15"),
            days,
            vacation_type,
            status,
        }
    }

    // ==========================================================================
    // VB-001: no complete period yet
    // ==========================================================================
    #[test]
    fn test_vb_001_first_year() {
        let employee = create_test_employee("2025-01-02");
        let balance = calculate_vacation_balance(&employee, &[], make_date("2025-12-31"), 30);

        assert_eq!(balance.total_days, 0);
        assert_eq!(balance.available_days, 0);
        assert!(balance.expires_at.is_none());
    }

    // ==========================================================================
    // VB-002: used and pending days are deducted
    // ==========================================================================
    #[test]
    fn test_vb_002_used_and_pending() {
        let employee = create_test_employee("2023-01-02");
        let vacations = vec![
            vacation(10, VacationType::Annual, VacationStatus::Completed),
            vacation(5, VacationType::Annual, VacationStatus::Approved),
            vacation(3, VacationType::Sold, VacationStatus::InProgress),
            vacation(7, VacationType::Annual, VacationStatus::Pending),
            vacation(9, VacationType::Annual, VacationStatus::Rejected),
            vacation(4, VacationType::Annual, VacationStatus::Cancelled),
        ];
        let balance =
            calculate_vacation_balance(&employee, &vacations, make_date("2025-03-10"), 30);

        assert_eq!(balance.total_days, 60);
        assert_eq!(balance.used_days, 18);
        assert_eq!(balance.pending_days, 7);
        assert_eq!(balance.available_days, 35);
        assert_eq!(balance.expires_at, Some(make_date("2026-01-02")));
    }

    // ==========================================================================
    // VB-003: available never goes negative
    // ==========================================================================
    #[test]
    fn test_vb_003_overdrawn_balance_floors_at_zero() {
        let employee = create_test_employee("2024-01-02");
        let vacations = vec![vacation(40, VacationType::Annual, VacationStatus::Approved)];
        let balance =
            calculate_vacation_balance(&employee, &vacations, make_date("2025-03-10"), 30);

        assert_eq!(balance.available_days, 0);
        assert!(balance.expires_at.is_none());
    }

    // ==========================================================================
    // VB-004: unpaid leave is not drawn from the balance
    // ==========================================================================
    #[test]
    fn test_vb_004_unpaid_excluded() {
        let employee = create_test_employee("2024-01-02");
        let vacations = vec![vacation(10, VacationType::Unpaid, VacationStatus::Approved)];
        let balance =
            calculate_vacation_balance(&employee, &vacations, make_date("2025-03-10"), 30);

        assert_eq!(balance.used_days, 0);
        assert_eq!(balance.available_days, 30);
    }

    #[test]
    fn test_period_completes_on_anniversary() {
        let employee = create_test_employee("2024-03-10");
        let before = calculate_vacation_balance(&employee, &[], make_date("2025-03-09"), 30);
        let on = calculate_vacation_balance(&employee, &[], make_date("2025-03-10"), 30);

        assert_eq!(before.total_days, 0);
        assert_eq!(on.total_days, 30);
        assert_eq!(on.expires_at, Some(make_date("2026-03-10")));
    }

    #[test]
    fn test_as_of_before_hire_date() {
        let employee = create_test_employee("2025-06-01");
        let balance = calculate_vacation_balance(&employee, &[], make_date("2025-01-01"), 30);
        assert_eq!(balance.total_days, 0);
    }
}
