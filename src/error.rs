//! Error types for the Bank of Hours Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording punches and
//! computing time balances.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Bank of Hours Engine.
///
/// Calculations tolerate incomplete data (missing punches, missing
/// schedules) and report it through day notes instead. Errors are reserved
/// for inputs the engine cannot work without.
///
/// # Example
///
/// ```
/// use bank_hours_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required input was absent or malformed.
    #[error("Invalid field '{field}': {message}")]
    ValidationError {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The requested date range cannot be evaluated.
    #[error("Invalid date range {start_date}..{end_date}: {message}")]
    InvalidDateRange {
        /// First date of the range.
        start_date: NaiveDate,
        /// Last date of the range.
        end_date: NaiveDate,
        /// Why the range was rejected.
        message: String,
    },

    /// No employee record is linked to the user.
    #[error("Employee not found for user '{user_id}'")]
    EmployeeNotFound {
        /// The user id that was looked up.
        user_id: String,
    },

    /// A punch was rejected by sequence or location rules.
    #[error("Invalid punch {punch_type}: {message}")]
    InvalidPunch {
        /// The punch type that was attempted.
        punch_type: String,
        /// The rule that rejected it.
        message: String,
    },

    /// The punch type was already recorded for the day.
    #[error("Punch {punch_type} already recorded on {date}")]
    DuplicatePunch {
        /// The duplicated punch type.
        punch_type: String,
        /// The day that already holds it.
        date: NaiveDate,
    },

    /// The request carried no usable session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why the session was rejected.
        message: String,
    },

    /// The session role may not access the resource.
    #[error("Role '{role}' may not access {resource}")]
    Forbidden {
        /// The caller's role.
        role: String,
        /// The resource that was denied.
        resource: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_validation_error_displays_field_and_message() {
        let error = EngineError::validation("employeeId", "must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid field 'employeeId': must not be empty"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_bounds() {
        let error = EngineError::InvalidDateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            message: "start date is after end date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range 2025-02-01..2025-01-01: start date is after end date"
        );
    }

    #[test]
    fn test_duplicate_punch_displays_type_and_date() {
        let error = EngineError::DuplicatePunch {
            punch_type: "ENTRY".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Punch ENTRY already recorded on 2025-03-10"
        );
    }

    #[test]
    fn test_forbidden_displays_role_and_resource() {
        let error = EngineError::Forbidden {
            role: "EMPLOYEE".to_string(),
            resource: "/bank-hours/employees".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Role 'EMPLOYEE' may not access /bank-hours/employees"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                user_id: "usr_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
