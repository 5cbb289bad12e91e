//! # Validation Tests
//!
//! Tests for `CertificateHooks::validate` on complete resources as they are
//! deserialized from the API server.

mod common;

use acm_certificate_controller::prelude::*;
use common::*;
use std::sync::Arc;

fn hooks_without_remote() -> CertificateHooks {
    let service = Arc::new(FakeCertificateService::new());
    let store = Arc::new(FakeSecretStore::new());
    let recorder = Arc::new(RecordingRecorder::default());
    hooks(&service, &store, &recorder)
}

fn from_yaml_like_json(value: serde_json::Value) -> Certificate {
    serde_json::from_value(value).expect("Certificate should deserialize")
}

#[test]
fn test_public_request_boundary() {
    let hooks = hooks_without_remote();

    for (count, should_pass) in [(0, true), (5, true), (6, false), (10, false)] {
        let options: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "domainName": format!("host{i}.example.com"),
                    "validationDomain": "example.com"
                })
            })
            .collect();
        let certificate = from_yaml_like_json(serde_json::json!({
            "apiVersion": "acm.services.k8s.aws/v1alpha1",
            "kind": "Certificate",
            "metadata": {"name": "web", "namespace": "team-a"},
            "spec": {
                "domainName": "example.com",
                "domainValidationOptions": options
            }
        }));

        let result = hooks.validate(&certificate);
        assert_eq!(
            result.is_ok(),
            should_pass,
            "Public request with {} validation options: {:?}",
            count,
            result
        );
        if let Err(error) = result {
            assert!(error.is_terminal());
            assert_eq!(error.resource(), "team-a/web");
        }
    }
}

#[test]
fn test_mutual_exclusivity_regardless_of_other_fields() {
    let hooks = hooks_without_remote();
    let certificate = from_yaml_like_json(serde_json::json!({
        "apiVersion": "acm.services.k8s.aws/v1alpha1",
        "kind": "Certificate",
        "metadata": {"name": "web", "namespace": "team-a"},
        "spec": {
            "domainName": "example.com",
            "certificate": {"name": "imported", "key": "tls.crt"},
            "privateKey": {"name": "imported", "key": "tls.key"},
            "certificateAuthorityARN": "arn:aws:acm-pca:us-east-1:123456789012:certificate-authority/abc",
            "tags": [{"key": "team", "value": "platform"}]
        }
    }));

    let error = hooks.validate(&certificate).unwrap_err();
    assert!(matches!(
        error.terminal_reason(),
        Some(TerminalReason::ConflictingMode { .. })
    ));
    assert_eq!(error.operation(), "validate");
}

#[test]
fn test_valid_import_returns_import_mode() {
    let hooks = hooks_without_remote();
    let spec = CertificateSpec {
        certificate: Some(secret_ref("imported", "tls.crt")),
        private_key: Some(secret_ref("imported", "tls.key")),
        ..CertificateSpec::default()
    };

    let mode = hooks.validate(&certificate(spec)).unwrap();
    assert_eq!(mode, AcquisitionMode::Import);
}

#[test]
fn test_export_without_passphrase_fails_validation() {
    let hooks = hooks_without_remote();
    let certificate = from_yaml_like_json(serde_json::json!({
        "apiVersion": "acm.services.k8s.aws/v1alpha1",
        "kind": "Certificate",
        "metadata": {"name": "web", "namespace": "team-a"},
        "spec": {
            "domainName": "example.com",
            "exportTo": {"name": "tls-secret"}
        }
    }));

    let error = hooks.validate(&certificate).unwrap_err();
    assert!(matches!(
        error.terminal_reason(),
        Some(TerminalReason::MissingExportPassphrase)
    ));
}

#[test]
fn test_certificate_without_request_or_import_fields_is_rejected() {
    let hooks = hooks_without_remote();
    let certificate = from_yaml_like_json(serde_json::json!({
        "apiVersion": "acm.services.k8s.aws/v1alpha1",
        "kind": "Certificate",
        "metadata": {"name": "web", "namespace": "team-a"},
        "spec": {
            "tags": [{"key": "team", "value": "platform"}]
        }
    }));

    let error = hooks.validate(&certificate).unwrap_err();
    assert!(error.is_terminal());
    assert!(matches!(
        error.terminal_reason(),
        Some(TerminalReason::MissingAcquisitionMode)
    ));
    assert_eq!(error.resource(), "team-a/web");
}

#[test]
fn test_empty_spec_is_rejected() {
    let hooks = hooks_without_remote();

    let result = hooks.validate(&certificate(CertificateSpec::default()));
    assert!(result.is_err(), "Empty spec should fail validation: {:?}", result);
    assert!(result.unwrap_err().is_terminal());
}
