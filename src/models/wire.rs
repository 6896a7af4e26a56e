//! Serde helpers for the wire formats the frontend exchanges.
//!
//! Clock times travel as `"HH:MM"`, punch timestamps as ISO date-times whose
//! wall-clock components are taken as written, and work days as weekday
//! numbers (0 = Sunday) or names.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Weekday};

/// Parses a clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Parses a punch timestamp, keeping the local wall-clock components.
///
/// Offsets in RFC 3339 input are not applied: `2025-03-10T07:00:00-03:00`
/// and `2025-03-10T07:00:00Z` both yield 07:00 on 2025-03-10.
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Maps a weekday number (0 = Sunday … 6 = Saturday) to a [`Weekday`].
pub fn weekday_from_number(number: u8) -> Option<Weekday> {
    match number {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// `HH:MM` clock times.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Writes the time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Reads `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }
}

/// Punch timestamps in organization local time.
pub mod local_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Writes `YYYY-MM-DDTHH:MM:SS` without offset.
    pub fn serialize<S: Serializer>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// Reads RFC 3339 or naive ISO date-times.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_local_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}

/// Lists of work days.
pub mod work_days {
    use std::str::FromStr;

    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de, ser::SerializeSeq};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDay {
        Number(u8),
        Name(String),
    }

    /// Writes weekday numbers, Sunday first.
    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(&day.num_days_from_sunday())?;
        }
        seq.end()
    }

    /// Reads weekday numbers or names.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Weekday>, D::Error> {
        let raw = Vec::<RawDay>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|day| match day {
                RawDay::Number(n) => super::weekday_from_number(n)
                    .ok_or_else(|| de::Error::custom(format!("invalid work day number {}", n))),
                RawDay::Name(name) => Weekday::from_str(&name)
                    .map_err(|_| de::Error::custom(format!("invalid work day '{}'", name))),
            })
            .collect()
    }
}
