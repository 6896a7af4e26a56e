//! Core data models for the Bank of Hours Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bank_hours;
mod employee;
mod medical_certificate;
mod period;
mod time_record;
mod vacation;
pub mod wire;

pub use bank_hours::{
    BalanceStatus, BalanceSummary, BankHoursData, BankHoursReport, DailyBankHoursEntry, DayStatus,
};
pub use employee::{AllowedLocation, Employee, WorkSchedule};
pub use medical_certificate::{CertificateStatus, MedicalCertificate};
pub use period::{DateRange, Holiday};
pub use time_record::{RecordType, TimeRecord};
pub use vacation::{Vacation, VacationBalance, VacationStatus, VacationType};
