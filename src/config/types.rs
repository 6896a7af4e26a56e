//! Configuration types for the bank of hours service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every field has a
//! default, so a partial `engine.yaml` is accepted.

use serde::{Deserialize, Serialize};

use crate::calculation::{
    DEFAULT_DAYS_PER_PERIOD, DEFAULT_MAX_RANGE_DAYS, HoursOptions, PeriodOptions, PunchPolicy,
    ToleranceMode,
};
use crate::models::{Employee, Holiday, MedicalCertificate, TimeRecord, Vacation};

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Bank of hours calculation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHoursConfig {
    /// How the schedule tolerance applies to deviations.
    #[serde(default)]
    pub tolerance_mode: ToleranceMode,
    /// Credit work on non-work days as overtime.
    #[serde(default)]
    pub credit_off_day_work: bool,
    /// Longest range a single query may cover, in days.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: i64,
}

fn default_max_range_days() -> i64 {
    DEFAULT_MAX_RANGE_DAYS
}

impl Default for BankHoursConfig {
    fn default() -> Self {
        Self {
            tolerance_mode: ToleranceMode::default(),
            credit_off_day_work: false,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

/// Vacation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationConfig {
    /// Days earned per complete year of employment.
    #[serde(default = "default_days_per_period")]
    pub days_per_period: u32,
}

fn default_days_per_period() -> u32 {
    DEFAULT_DAYS_PER_PERIOD
}

impl Default for VacationConfig {
    fn default() -> Self {
        Self {
            days_per_period: DEFAULT_DAYS_PER_PERIOD,
        }
    }
}

/// Punch recording policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchConfig {
    /// Reject on-site punches outside the allowed locations.
    #[serde(default = "default_enforce_geofence")]
    pub enforce_geofence: bool,
}

fn default_enforce_geofence() -> bool {
    true
}

impl Default for PunchConfig {
    fn default() -> Self {
        Self {
            enforce_geofence: true,
        }
    }
}

/// The contents of `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Calculation settings.
    #[serde(default)]
    pub bank_hours: BankHoursConfig,
    /// Vacation policy.
    #[serde(default)]
    pub vacation: VacationConfig,
    /// Punch policy.
    #[serde(default)]
    pub punch: PunchConfig,
}

impl EngineConfig {
    /// Period options derived from the calculation settings.
    pub fn period_options(&self) -> PeriodOptions {
        PeriodOptions {
            hours: HoursOptions {
                tolerance_mode: self.bank_hours.tolerance_mode,
                credit_off_day_work: self.bank_hours.credit_off_day_work,
            },
            max_range_days: Some(self.bank_hours.max_range_days),
            evaluate_until: None,
        }
    }

    /// Punch policy derived from the punch settings.
    pub fn punch_policy(&self) -> PunchPolicy {
        PunchPolicy {
            enforce_geofence: self.punch.enforce_geofence,
        }
    }
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// Organization holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Records the in-memory store starts with, read from `seed.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Punches.
    #[serde(default)]
    pub time_records: Vec<TimeRecord>,
    /// Vacation requests.
    #[serde(default)]
    pub vacations: Vec<Vacation>,
    /// Medical certificates.
    #[serde(default)]
    pub medical_certificates: Vec<MedicalCertificate>,
}
