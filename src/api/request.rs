//! Request types for the Bank of Hours Engine API.
//!
//! This module defines the query strings of the read endpoints and the
//! multipart form of the punch endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::BalanceStatus;

/// Query of `GET /time-records/my-records/bank-hours`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankHoursQuery {
    /// First date of the period.
    pub start_date: Option<NaiveDate>,
    /// Last date of the period.
    pub end_date: Option<NaiveDate>,
    /// Include the per-day breakdown.
    #[serde(default)]
    pub detailed: bool,
}

/// Query of `GET /time-records/my-records/period`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    /// First date of the period.
    pub start_date: Option<NaiveDate>,
    /// Last date of the period.
    pub end_date: Option<NaiveDate>,
}

/// Query of `GET /bank-hours/employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeesQuery {
    /// First date of the period.
    pub start_date: Option<NaiveDate>,
    /// Last date of the period.
    pub end_date: Option<NaiveDate>,
    /// Only employees of this department.
    pub department: Option<String>,
    /// Only employees whose balance has this sign.
    pub status: Option<BalanceStatus>,
    /// Only employees of this cost center.
    pub cost_center: Option<String>,
    /// Only employees allocated to this client.
    pub client: Option<String>,
}

impl EmployeesQuery {
    /// Whether an employee row passes the department, cost center and client
    /// filters. Comparisons ignore case.
    pub fn matches(
        &self,
        department: &str,
        cost_center: Option<&str>,
        client: Option<&str>,
    ) -> bool {
        fn same(filter: &Option<String>, value: Option<&str>) -> bool {
            match filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
                None => true,
                Some(f) => value.is_some_and(|v| v.eq_ignore_ascii_case(f)),
            }
        }
        same(&self.department, Some(department))
            && same(&self.cost_center, cost_center)
            && same(&self.client, client)
    }
}

/// Fields of the multipart body of `POST /time-records/punch`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PunchForm {
    /// Punch type, e.g. `ENTRY`.
    pub record_type: Option<String>,
    /// Reported latitude.
    pub latitude: Option<f64>,
    /// Reported longitude.
    pub longitude: Option<f64>,
    /// Size of the uploaded photo.
    pub photo_bytes: usize,
    /// Free text entered by the employee.
    pub observation: Option<String>,
}
