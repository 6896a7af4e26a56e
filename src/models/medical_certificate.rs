//! Medical certificate (justified absence) model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review status of a medical certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    /// Submitted, waiting for HR review.
    Pending,
    /// Accepted by HR; covered days are excused.
    Approved,
    /// Refused by HR.
    Rejected,
}

/// A medical certificate submitted to excuse one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCertificate {
    /// Unique identifier of the certificate.
    pub id: String,
    /// The submitting user.
    pub user_id: String,
    /// First excused day (inclusive).
    pub start_date: NaiveDate,
    /// Last excused day (inclusive).
    pub end_date: NaiveDate,
    /// Number of excused days.
    pub days: u32,
    /// Review status.
    pub status: CertificateStatus,
}

impl MedicalCertificate {
    /// Returns true if the certificate was accepted.
    pub fn is_approved(&self) -> bool {
        self.status == CertificateStatus::Approved
    }

    /// Returns true if the date lies within the certificate (inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_certificate() {
        let json = r#"{
            "id": "mc_001",
            "userId": "usr_001",
            "startDate": "2025-03-12",
            "endDate": "2025-03-13",
            "days": 2,
            "status": "APPROVED"
        }"#;
        let certificate: MedicalCertificate = serde_json::from_str(json).unwrap();
        assert!(certificate.is_approved());
        assert!(certificate.covers(NaiveDate::from_ymd_opt(2025, 3, 13).unwrap()));
        assert!(!certificate.covers(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()));
    }

    #[test]
    fn test_pending_certificate_is_not_approved() {
        let certificate: MedicalCertificate = serde_json::from_str(
            r#"{"id":"mc_002","userId":"usr_001","startDate":"2025-03-12",
                "endDate":"2025-03-12","days":1,"status":"PENDING"}"#,
        )
        .unwrap();
        assert!(!certificate.is_approved());
    }
}
