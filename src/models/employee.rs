//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct together with its
//! [`WorkSchedule`] and the [`AllowedLocation`] geofences punches are
//! checked against.

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire;

/// Mean earth radius used for punch distance checks.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// The contracted daily schedule of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    /// Expected start of the work day.
    #[serde(with = "wire::clock_time")]
    pub start_time: NaiveTime,
    /// Expected end of the work day.
    #[serde(with = "wire::clock_time")]
    pub end_time: NaiveTime,
    /// Expected start of lunch.
    #[serde(with = "wire::clock_time")]
    pub lunch_start_time: NaiveTime,
    /// Expected end of lunch.
    #[serde(with = "wire::clock_time")]
    pub lunch_end_time: NaiveTime,
    /// Days of the week the schedule applies to.
    #[serde(with = "wire::work_days")]
    pub work_days: Vec<Weekday>,
    /// Grace window, in minutes, before a deviation counts.
    #[serde(default)]
    pub tolerance_minutes: u32,
}

impl WorkSchedule {
    /// Minutes of the scheduled lunch break, never negative.
    pub fn lunch_minutes(&self) -> i64 {
        (self.lunch_end_time - self.lunch_start_time)
            .num_minutes()
            .max(0)
    }

    /// Expected worked minutes on a work day: end − start − lunch.
    ///
    /// # Examples
    ///
    /// ```
    /// use bank_hours_engine::models::WorkSchedule;
    /// use chrono::{NaiveTime, Weekday};
    ///
    /// let schedule = WorkSchedule {
    ///     start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    ///     lunch_start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    ///     lunch_end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
    ///     work_days: vec![Weekday::Mon, Weekday::Tue],
    ///     tolerance_minutes: 10,
    /// };
    /// assert_eq!(schedule.full_day_minutes(), 540);
    /// ```
    pub fn full_day_minutes(&self) -> i64 {
        let span = (self.end_time - self.start_time).num_minutes();
        (span - self.lunch_minutes()).max(0)
    }

    /// Returns true if the weekday is one of the schedule's work days.
    pub fn is_work_day(&self, weekday: Weekday) -> bool {
        self.work_days.contains(&weekday)
    }
}

/// A place a non-remote employee may punch from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedLocation {
    /// Display name of the location.
    pub name: String,
    /// Latitude of the location centre.
    pub latitude: f64,
    /// Longitude of the location centre.
    pub longitude: f64,
    /// Accepted distance from the centre, in meters.
    pub radius_meters: f64,
}

impl AllowedLocation {
    /// Great-circle distance in meters from the location centre.
    pub fn distance_meters(&self, latitude: f64, longitude: f64) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = latitude.to_radians();
        let d_lat = (latitude - self.latitude).to_radians();
        let d_lon = (longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Returns true if the coordinates fall within the radius.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.distance_meters(latitude, longitude) <= self.radius_meters
    }
}

/// Represents an employee whose punches are accounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee registration number.
    pub employee_id: String,
    /// The login account linked to this employee.
    pub user_id: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// Job position.
    #[serde(default)]
    pub position: String,
    /// First day of employment.
    pub hire_date: NaiveDate,
    /// Monthly salary.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<Decimal>,
    /// Contracted schedule. Without one no day has expected hours.
    #[serde(default)]
    pub work_schedule: Option<WorkSchedule>,
    /// Remote employees may punch from anywhere.
    #[serde(default)]
    pub is_remote: bool,
    /// Geofences for on-site employees.
    #[serde(default)]
    pub allowed_locations: Vec<AllowedLocation>,
    /// Cost center used by the admin views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Client the employee is allocated to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn standard_schedule() -> WorkSchedule {
        WorkSchedule {
            start_time: time(7, 0),
            end_time: time(17, 0),
            lunch_start_time: time(12, 0),
            lunch_end_time: time(13, 0),
            work_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            tolerance_minutes: 10,
        }
    }

    #[test]
    fn test_full_day_excludes_lunch() {
        let schedule = standard_schedule();
        assert_eq!(schedule.lunch_minutes(), 60);
        assert_eq!(schedule.full_day_minutes(), 540);
    }

    #[test]
    fn test_inverted_lunch_counts_as_no_lunch() {
        let mut schedule = standard_schedule();
        schedule.lunch_start_time = time(13, 0);
        schedule.lunch_end_time = time(12, 0);
        assert_eq!(schedule.lunch_minutes(), 0);
        assert_eq!(schedule.full_day_minutes(), 600);
    }

    #[test]
    fn test_inverted_schedule_never_goes_negative() {
        let mut schedule = standard_schedule();
        schedule.end_time = time(6, 0);
        assert_eq!(schedule.full_day_minutes(), 0);
    }

    #[test]
    fn test_is_work_day() {
        let schedule = standard_schedule();
        assert!(schedule.is_work_day(Weekday::Mon));
        assert!(!schedule.is_work_day(Weekday::Sat));
        assert!(!schedule.is_work_day(Weekday::Sun));
    }

    #[test]
    fn test_deserialize_employee_with_numeric_work_days() {
        let json = r#"{
            "employeeId": "EMP001",
            "userId": "usr_001",
            "name": "Ana Souza",
            "department": "Operations",
            "position": "Analyst",
            "hireDate": "2022-02-01",
            "salary": 4500.50,
            "isRemote": false,
            "workSchedule": {
                "startTime": "07:00",
                "endTime": "17:00",
                "lunchStartTime": "12:00",
                "lunchEndTime": "13:00",
                "workDays": [1, 2, 3, 4, 5],
                "toleranceMinutes": 10
            },
            "allowedLocations": [
                {"name": "HQ", "latitude": -23.5505, "longitude": -46.6333, "radiusMeters": 200}
            ]
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        let schedule = employee.work_schedule.as_ref().unwrap();
        assert_eq!(schedule.work_days.len(), 5);
        assert!(schedule.is_work_day(Weekday::Mon));
        assert!(!schedule.is_work_day(Weekday::Sun));
        assert_eq!(schedule.start_time, time(7, 0));
        assert_eq!(employee.salary, Some(Decimal::new(450050, 2)));
        assert_eq!(employee.allowed_locations[0].name, "HQ");
    }

    #[test]
    fn test_deserialize_employee_with_named_work_days_and_no_schedule() {
        let json = r#"{
            "employeeId": "EMP002",
            "userId": "usr_002",
            "hireDate": "2023-01-09"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.work_schedule.is_none());
        assert!(!employee.is_remote);

        let schedule: WorkSchedule = serde_json::from_str(
            r#"{
                "startTime": "08:00:00",
                "endTime": "12:00:00",
                "lunchStartTime": "12:00",
                "lunchEndTime": "12:00",
                "workDays": ["Sat", "sunday"]
            }"#,
        )
        .unwrap();
        assert_eq!(schedule.work_days, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(schedule.tolerance_minutes, 0);
        assert_eq!(schedule.full_day_minutes(), 240);
    }

    #[test]
    fn test_work_days_serialize_as_numbers() {
        let json = serde_json::to_value(standard_schedule()).unwrap();
        assert_eq!(json["workDays"], serde_json::json!([1, 2, 3, 4, 5]));
        assert_eq!(json["startTime"], "07:00");
    }

    #[test]
    fn test_location_contains_nearby_point() {
        let hq = AllowedLocation {
            name: "HQ".to_string(),
            latitude: -23.5505,
            longitude: -46.6333,
            radius_meters: 200.0,
        };
        // Roughly 110 m north.
        assert!(hq.contains(-23.5495, -46.6333));
        // Roughly 1.1 km north.
        assert!(!hq.contains(-23.5405, -46.6333));
        assert!(hq.distance_meters(-23.5505, -46.6333) < 0.001);
    }
}
