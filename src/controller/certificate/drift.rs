//! # Issuance Drift
//!
//! Surfaces first issuance and renewal as a spec difference so the driver
//! runs the update path (and therefore the export) exactly when the
//! certificate material changes.

use crate::constants::ISSUED_AT_DELTA_PATH;
use crate::controller::compare::Delta;
use crate::crd::{Certificate, CertificateStatusKind};
use chrono::{DateTime, Utc};
use serde_json::Value;

fn issued_at(certificate: &Certificate) -> Option<DateTime<Utc>> {
    certificate
        .status
        .as_ref()
        .and_then(|status| status.issued_at)
}

fn status_kind(certificate: &Certificate) -> Option<CertificateStatusKind> {
    certificate.status.as_ref().and_then(|status| status.status)
}

fn timestamp_value(timestamp: Option<DateTime<Utc>>) -> Option<Value> {
    timestamp.map(|t| Value::String(t.to_rfc3339()))
}

/// Compare the issuance timestamp of `a` (previously observed) and `b`
/// (latest observed)
///
/// Adds a difference at `Spec.Status.IssuedAt` when `a` has no timestamp and
/// `b` is `ISSUED`, or when both have timestamps and they differ.
pub fn compare_issued_at(delta: &mut Delta, a: &Certificate, b: &Certificate) {
    let previous = issued_at(a);
    let latest = issued_at(b);

    let first_issuance =
        previous.is_none() && status_kind(b) == Some(CertificateStatusKind::Issued);
    let renewed = matches!((previous, latest), (Some(p), Some(l)) if p != l);

    if first_issuance || renewed {
        delta.add(
            ISSUED_AT_DELTA_PATH,
            timestamp_value(previous),
            timestamp_value(latest),
        );
    }
}
