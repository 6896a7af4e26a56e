//! Balance accumulation.
//!
//! Sums the daily minute totals of a period into a [`BalanceSummary`].

use crate::models::BalanceSummary;

use super::hours::{DayHours, minutes_to_hours};

/// Sums overtime and owed minutes over `days`.
///
/// The sums are kept in minutes and converted to hours once, so daily
/// rounding never accumulates. `balance_hours` is exactly the difference
/// of the two reported totals. The result does not depend on the order of
/// the days.
pub fn accumulate<'a, I>(days: I) -> BalanceSummary
where
    I: IntoIterator<Item = &'a DayHours>,
{
    let (overtime, owed) = days
        .into_iter()
        .fold((0i64, 0i64), |(overtime, owed), day| {
            (overtime + day.overtime_minutes, owed + day.owed_minutes)
        });

    let total_overtime_hours = minutes_to_hours(overtime);
    let total_owed_hours = minutes_to_hours(owed);

    BalanceSummary {
        total_overtime_hours,
        total_owed_hours,
        balance_hours: total_overtime_hours - total_owed_hours,
    }
}
