//! # Certificate Validation
//!
//! Pure checks run before a certificate is created or exported. Every failure
//! is terminal: the resource cannot become valid without a user edit.

use crate::constants::LIMIT_DOMAIN_VALIDATION_OPTIONS_PUBLIC;
use crate::controller::error::TerminalReason;
use crate::crd::Certificate;

/// How a certificate is acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// Certificate, chain and key are supplied by the user
    Import,
    /// ACM issues the certificate
    Request,
    /// Neither import nor request fields are set
    Unspecified,
}

/// Names of the request-only fields set on the certificate
fn request_fields_set(certificate: &Certificate) -> Vec<&'static str> {
    let spec = &certificate.spec;
    let mut fields = Vec::new();
    if spec.domain_name.is_some() {
        fields.push("domainName");
    }
    if !spec.domain_validation_options.is_empty() {
        fields.push("domainValidationOptions");
    }
    if spec.key_algorithm.is_some() {
        fields.push("keyAlgorithm");
    }
    if !spec.subject_alternative_names.is_empty() {
        fields.push("subjectAlternativeNames");
    }
    if spec.options.is_some() {
        fields.push("options");
    }
    fields
}

/// Names of the import-only fields set on the certificate
fn import_fields_set(certificate: &Certificate) -> Vec<&'static str> {
    let spec = &certificate.spec;
    [
        ("certificate", spec.certificate.is_some()),
        ("certificateChain", spec.certificate_chain.is_some()),
        ("privateKey", spec.private_key.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, set)| set.then_some(field))
    .collect()
}

/// Determine the acquisition mode of a certificate
///
/// Import and request fields are mutually exclusive. An import must carry a
/// private key.
pub fn validate_request_mode(certificate: &Certificate) -> Result<AcquisitionMode, TerminalReason> {
    let import_fields = import_fields_set(certificate);
    let request_fields = request_fields_set(certificate);

    match (import_fields.is_empty(), request_fields.is_empty()) {
        (false, false) => Err(TerminalReason::ConflictingMode {
            import_fields: import_fields.join(", "),
            request_fields: request_fields.join(", "),
        }),
        (false, true) => {
            if certificate.spec.private_key.is_none() {
                return Err(TerminalReason::MissingImportField {
                    field: "privateKey",
                });
            }
            Ok(AcquisitionMode::Import)
        }
        (true, false) => Ok(AcquisitionMode::Request),
        (true, true) => Ok(AcquisitionMode::Unspecified),
    }
}

/// Enforce the DNS validation fan-out limit on public certificate requests
///
/// A certificate without `certificateAuthorityARN` is issued by the public
/// ACM CA and may carry at most 5 domain validation options. Private CA
/// requests are not limited.
pub fn validate_public_validation_options(certificate: &Certificate) -> Result<(), TerminalReason> {
    let is_public = certificate
        .spec
        .certificate_authority_arn
        .as_deref()
        .is_none_or(str::is_empty);
    let count = certificate.spec.domain_validation_options.len();

    if is_public && count > LIMIT_DOMAIN_VALIDATION_OPTIONS_PUBLIC {
        return Err(TerminalReason::TooManyValidationOptions {
            count,
            limit: LIMIT_DOMAIN_VALIDATION_OPTIONS_PUBLIC,
        });
    }
    Ok(())
}

/// Export configuration is all or nothing
pub fn validate_export_options(certificate: &Certificate) -> Result<(), TerminalReason> {
    let Some(target) = certificate.spec.export_to.as_ref() else {
        return Ok(());
    };
    if certificate.spec.export_passphrase.is_none() {
        return Err(TerminalReason::MissingExportPassphrase);
    }
    if target.name.trim().is_empty() {
        return Err(TerminalReason::MissingExportDestination);
    }
    Ok(())
}
