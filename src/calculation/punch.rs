//! Punch validation.
//!
//! This module decides whether a new punch may be recorded, given the
//! punches the employee already recorded on the same day. It enforces the
//! ENTRY→LUNCH_START→LUNCH_END→EXIT sequence, break pairing, and the
//! geofence of on-site employees.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, RecordType, TimeRecord};

/// Switches of the punch validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPolicy {
    /// Require on-site employees to punch inside an allowed location.
    pub enforce_geofence: bool,
}

impl Default for PunchPolicy {
    fn default() -> Self {
        Self {
            enforce_geofence: true,
        }
    }
}

/// A punch that has not been recorded yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PunchAttempt {
    /// Type of the punch.
    pub record_type: RecordType,
    /// Local time of the punch.
    pub timestamp: NaiveDateTime,
    /// Reported latitude.
    pub latitude: Option<f64>,
    /// Reported longitude.
    pub longitude: Option<f64>,
}

/// Validates `attempt` against the punches already recorded on its day.
///
/// Records of other days and invalidated records are ignored.
///
/// # Errors
///
/// - [`EngineError::DuplicatePunch`] when the core type is already recorded.
/// - [`EngineError::InvalidPunch`] for sequence, break, and location
///   violations.
pub fn validate_punch(
    employee: &Employee,
    today_records: &[TimeRecord],
    attempt: &PunchAttempt,
    policy: PunchPolicy,
) -> EngineResult<()> {
    let date = attempt.timestamp.date();
    let recorded: Vec<RecordType> = today_records
        .iter()
        .filter(|r| r.is_valid && r.date() == date)
        .map(|r| r.record_type)
        .collect();
    let has = |t: RecordType| recorded.contains(&t);
    let reject = |message: &str| {
        Err(EngineError::InvalidPunch {
            punch_type: attempt.record_type.to_string(),
            message: message.to_string(),
        })
    };

    if has(RecordType::AbsenceJustified) {
        return reject("the day is already justified");
    }

    let breaks_started = recorded
        .iter()
        .filter(|t| **t == RecordType::BreakStart)
        .count();
    let breaks_ended = recorded
        .iter()
        .filter(|t| **t == RecordType::BreakEnd)
        .count();
    let break_open = breaks_started > breaks_ended;

    match attempt.record_type {
        RecordType::AbsenceJustified => {
            if !recorded.is_empty() {
                return reject("punches were already recorded on this day");
            }
        }
        core if core.is_core() => {
            if has(core) {
                return Err(EngineError::DuplicatePunch {
                    punch_type: core.to_string(),
                    date,
                });
            }
            if has(RecordType::Exit) {
                return reject("the work day is already closed");
            }
            match core {
                RecordType::LunchStart if !has(RecordType::Entry) => {
                    return reject("ENTRY must be recorded first");
                }
                RecordType::LunchEnd if !has(RecordType::LunchStart) => {
                    return reject("LUNCH_START must be recorded first");
                }
                RecordType::Exit if !has(RecordType::Entry) => {
                    return reject("ENTRY must be recorded first");
                }
                RecordType::Exit if has(RecordType::LunchStart) && !has(RecordType::LunchEnd) => {
                    return reject("LUNCH_END must be recorded first");
                }
                _ => {}
            }
            if break_open && core != RecordType::Entry {
                return reject("the open break must be closed first");
            }
        }
        RecordType::BreakStart => {
            if !has(RecordType::Entry) || has(RecordType::Exit) {
                return reject("a break needs an open work day");
            }
            if break_open {
                return reject("a break is already open");
            }
        }
        RecordType::BreakEnd => {
            if !break_open {
                return reject("no break is open");
            }
        }
        _ => {}
    }

    if attempt.record_type != RecordType::AbsenceJustified {
        check_geofence(employee, attempt, policy)?;
    }

    Ok(())
}

fn check_geofence(
    employee: &Employee,
    attempt: &PunchAttempt,
    policy: PunchPolicy,
) -> EngineResult<()> {
    if !policy.enforce_geofence || employee.is_remote || employee.allowed_locations.is_empty() {
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) = (attempt.latitude, attempt.longitude) else {
        return Err(EngineError::InvalidPunch {
            punch_type: attempt.record_type.to_string(),
            message: "location is required".to_string(),
        });
    };

    if employee
        .allowed_locations
        .iter()
        .any(|l| l.contains(latitude, longitude))
    {
        return Ok(());
    }

    let nearest = employee
        .allowed_locations
        .iter()
        .map(|l| l.distance_meters(latitude, longitude))
        .fold(f64::INFINITY, f64::min);

    Err(EngineError::InvalidPunch {
        punch_type: attempt.record_type.to_string(),
        message: format!(
            "outside the allowed locations ({:.0} m from the nearest)",
            nearest
        ),
    })
}
