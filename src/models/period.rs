//! Date range and holiday models.
//!
//! This module contains the [`DateRange`] and [`Holiday`] types that define
//! the calendar window a bank of hours calculation covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An organization holiday. Holidays are never work days.
///
/// # Example
///
/// ```
/// use bank_hours_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
///     name: "Tiradentes".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use bank_hours_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange {
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// };
///
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())); // start date
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())); // end date
/// assert!(!range.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())); // after
/// assert_eq!(range.days().count(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range from its bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Checks if a given date falls within this range, bounds included.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the range; zero when the bounds are inverted.
    pub fn len_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }

    /// Iterates over every date of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }
}
