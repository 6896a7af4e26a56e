//! In-memory record store.
//!
//! Holds employees, punches, vacations and medical certificates keyed by
//! user id. The service shares one store behind an
//! `Arc<tokio::sync::RwLock<RecordStore>>`: queries take the read lock,
//! recording a punch takes the write lock.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::config::SeedData;
use crate::models::{DateRange, Employee, MedicalCertificate, RecordType, TimeRecord, Vacation};

/// A punch accepted by the validator, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeRecord {
    /// Type of the punch.
    pub record_type: RecordType,
    /// Local time of the punch.
    pub timestamp: NaiveDateTime,
    /// Reported latitude.
    pub latitude: Option<f64>,
    /// Reported longitude.
    pub longitude: Option<f64>,
    /// Where the photo was stored, if anywhere.
    pub photo_url: Option<String>,
    /// Free text entered by the employee.
    pub observation: Option<String>,
}

/// Records of every employee, keyed by user id.
#[derive(Debug, Default)]
pub struct RecordStore {
    employees: HashMap<String, Employee>,
    records: HashMap<String, Vec<TimeRecord>>,
    vacations: HashMap<String, Vec<Vacation>>,
    certificates: HashMap<String, Vec<MedicalCertificate>>,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the seed records
    pub fn from_seed(seed: &SeedData) -> Self {
        let mut store = Self::new();
        for employee in &seed.employees {
            store.insert_employee(employee.clone());
        }
        for record in &seed.time_records {
            store
                .records
                .entry(record.user_id.clone())
                .or_default()
                .push(record.clone());
        }
        for vacation in &seed.vacations {
            store
                .vacations
                .entry(vacation.user_id.clone())
                .or_default()
                .push(vacation.clone());
        }
        for certificate in &seed.medical_certificates {
            store
                .certificates
                .entry(certificate.user_id.clone())
                .or_default()
                .push(certificate.clone());
        }
        for records in store.records.values_mut() {
            records.sort_by_key(|r| r.timestamp);
        }
        store
    }

    /// Add or replace an employee
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.user_id.clone(), employee);
    }

    /// Get the employee linked to a user
    pub fn employee_by_user(&self, user_id: &str) -> Option<&Employee> {
        self.employees.get(user_id)
    }

    /// All employees, ordered by employee id
    pub fn employees(&self) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self.employees.values().collect();
        employees.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        employees
    }

    /// Punches of a user within a date range, in timestamp order
    pub fn records_for_user(&self, user_id: &str, range: DateRange) -> Vec<TimeRecord> {
        self.records
            .get(user_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| range.contains_date(r.date()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Vacation requests of a user
    pub fn vacations_for_user(&self, user_id: &str) -> Vec<Vacation> {
        self.vacations.get(user_id).cloned().unwrap_or_default()
    }

    /// Medical certificates of a user
    pub fn certificates_for_user(&self, user_id: &str) -> Vec<MedicalCertificate> {
        self.certificates.get(user_id).cloned().unwrap_or_default()
    }

    /// Store a punch for an employee and return the created record
    pub fn record_punch(&mut self, employee: &Employee, punch: NewTimeRecord) -> TimeRecord {
        let record = TimeRecord {
            id: format!("tr_{}", Uuid::new_v4().simple()),
            user_id: employee.user_id.clone(),
            employee_id: employee.employee_id.clone(),
            record_type: punch.record_type,
            timestamp: punch.timestamp,
            latitude: punch.latitude,
            longitude: punch.longitude,
            photo_url: punch.photo_url,
            observation: punch.observation,
            is_valid: true,
        };

        let records = self.records.entry(employee.user_id.clone()).or_default();
        let position = records.partition_point(|r| r.timestamp <= record.timestamp);
        records.insert(position, record.clone());

        record
    }
}
