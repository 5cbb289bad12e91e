//! # Certificate Status
//!
//! Observed state of an ACM certificate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crd::Tag;

/// Status of the Certificate resource
///
/// Populated from ACM by read/create/update calls.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStatus {
    /// ARN of the certificate in ACM
    #[serde(rename = "certificateARN", default)]
    pub certificate_arn: Option<String>,
    /// Issuance status reported by ACM
    #[serde(default)]
    pub status: Option<CertificateStatusKind>,
    /// Time at which the certificate was issued
    /// Only present for certificates issued by ACM
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    /// Time after which the certificate is not valid
    #[serde(default)]
    pub not_after: Option<DateTime<Utc>>,
    /// Time before which the certificate is not valid
    #[serde(default)]
    pub not_before: Option<DateTime<Utc>>,
    /// Serial number of the certificate
    #[serde(default)]
    pub serial: Option<String>,
    /// Tags last synced to ACM
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Issuance status of an ACM certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatusKind {
    PendingValidation,
    Issued,
    Inactive,
    Expired,
    ValidationTimedOut,
    Revoked,
    Failed,
    /// A status this controller does not know about
    #[serde(other)]
    Unknown,
}

impl CertificateStatusKind {
    /// Get the label used by the ACM API
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatusKind::PendingValidation => "PENDING_VALIDATION",
            CertificateStatusKind::Issued => "ISSUED",
            CertificateStatusKind::Inactive => "INACTIVE",
            CertificateStatusKind::Expired => "EXPIRED",
            CertificateStatusKind::ValidationTimedOut => "VALIDATION_TIMED_OUT",
            CertificateStatusKind::Revoked => "REVOKED",
            CertificateStatusKind::Failed => "FAILED",
            CertificateStatusKind::Unknown => "UNKNOWN",
        }
    }

    /// Parse an ACM status label, mapping unrecognised values to `Unknown`
    #[must_use]
    pub fn from_api(label: &str) -> Self {
        match label {
            "PENDING_VALIDATION" => CertificateStatusKind::PendingValidation,
            "ISSUED" => CertificateStatusKind::Issued,
            "INACTIVE" => CertificateStatusKind::Inactive,
            "EXPIRED" => CertificateStatusKind::Expired,
            "VALIDATION_TIMED_OUT" => CertificateStatusKind::ValidationTimedOut,
            "REVOKED" => CertificateStatusKind::Revoked,
            "FAILED" => CertificateStatusKind::Failed,
            _ => CertificateStatusKind::Unknown,
        }
    }
}

/// Condition represents a condition of a resource
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for the condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_kind_parses_api_labels() {
        let status: CertificateStatus = serde_json::from_value(serde_json::json!({
            "certificateARN": "arn:aws:acm:us-east-1:123456789012:certificate/abc",
            "status": "PENDING_VALIDATION",
            "issuedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(status.status, Some(CertificateStatusKind::PendingValidation));
        assert!(status.issued_at.is_some());
        assert_eq!(
            CertificateStatusKind::from_api("ISSUED").as_str(),
            "ISSUED"
        );
    }

    #[test]
    fn test_unrecognised_status_maps_to_unknown() {
        let kind: CertificateStatusKind = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(kind, CertificateStatusKind::Unknown);
        assert_eq!(
            CertificateStatusKind::from_api("SOMETHING_NEW"),
            CertificateStatusKind::Unknown
        );
    }
}
