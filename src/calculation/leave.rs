//! Absence and vacation offset rule.
//!
//! Days covered by an approved vacation or an approved medical certificate
//! carry no expected hours. This module answers whether a date is covered;
//! the aggregator applies the precedence between the two.

use chrono::NaiveDate;

use crate::models::{MedicalCertificate, Vacation};

/// Returns the approved vacation covering `date`, if any.
pub fn approved_vacation_on(vacations: &[Vacation], date: NaiveDate) -> Option<&Vacation> {
    vacations
        .iter()
        .find(|v| v.status.is_approved() && v.covers(date))
}

/// Returns the approved medical certificate covering `date`, if any.
pub fn approved_certificate_on(
    certificates: &[MedicalCertificate],
    date: NaiveDate,
) -> Option<&MedicalCertificate> {
    certificates
        .iter()
        .find(|c| c.is_approved() && c.covers(date))
}
