//! Time record (punch) model.
//!
//! This module defines the [`TimeRecord`] struct and the [`RecordType`]
//! enum for the clock events an employee registers during a work day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::wire;

/// The kind of clock event a time record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// Start of the work day.
    Entry,
    /// Start of the lunch break.
    LunchStart,
    /// End of the lunch break.
    LunchEnd,
    /// End of the work day.
    Exit,
    /// Start of a short break.
    BreakStart,
    /// End of a short break.
    BreakEnd,
    /// Stands in for the whole day as an excused absence.
    AbsenceJustified,
}

impl RecordType {
    /// The four punches every work day is expected to carry, in order.
    pub const CORE_SEQUENCE: [RecordType; 4] = [
        RecordType::Entry,
        RecordType::LunchStart,
        RecordType::LunchEnd,
        RecordType::Exit,
    ];

    /// Returns the wire name of the record type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Entry => "ENTRY",
            RecordType::LunchStart => "LUNCH_START",
            RecordType::LunchEnd => "LUNCH_END",
            RecordType::Exit => "EXIT",
            RecordType::BreakStart => "BREAK_START",
            RecordType::BreakEnd => "BREAK_END",
            RecordType::AbsenceJustified => "ABSENCE_JUSTIFIED",
        }
    }

    /// Returns true for ENTRY, LUNCH_START, LUNCH_END and EXIT.
    pub fn is_core(&self) -> bool {
        Self::CORE_SEQUENCE.contains(self)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(RecordType::Entry),
            "LUNCH_START" => Ok(RecordType::LunchStart),
            "LUNCH_END" => Ok(RecordType::LunchEnd),
            "EXIT" => Ok(RecordType::Exit),
            "BREAK_START" => Ok(RecordType::BreakStart),
            "BREAK_END" => Ok(RecordType::BreakEnd),
            "ABSENCE_JUSTIFIED" => Ok(RecordType::AbsenceJustified),
            other => Err(format!("unknown record type '{}'", other)),
        }
    }
}

/// A single punch registered by an employee.
///
/// Records are immutable once created; only `is_valid` may be changed
/// later by an approver. Invalidated records are ignored by the bank of
/// hours calculation.
///
/// # Example
///
/// ```
/// use bank_hours_engine::models::{RecordType, TimeRecord};
///
/// let json = r#"{
///     "id": "tr_001",
///     "userId": "usr_001",
///     "employeeId": "EMP001",
///     "type": "ENTRY",
///     "timestamp": "2025-03-10T07:00:00.000Z"
/// }"#;
///
/// let record: TimeRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.record_type, RecordType::Entry);
/// assert!(record.is_valid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    /// Unique identifier of the record.
    pub id: String,
    /// The user who punched.
    pub user_id: String,
    /// The employee registration of that user.
    pub employee_id: String,
    /// The kind of punch.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// When the punch happened, in organization local time.
    #[serde(with = "wire::local_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Latitude captured with the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude captured with the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Location of the photo taken with the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Free text entered by the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    /// Whether the record counts towards hour totals.
    #[serde(default = "default_is_valid")]
    pub is_valid: bool,
}

fn default_is_valid() -> bool {
    true
}

impl TimeRecord {
    /// The calendar date of the punch, by its local date components.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
