//! # Certificate Export
//!
//! Exports an issued certificate and its private key from ACM into a
//! Kubernetes Secret.
//!
//! The certificate (with its chain appended) is written before the private
//! key is decrypted, so a key failure still leaves the certificate in place.
//! The export is not transactional. Re-running it overwrites both entries
//! with the same content for the same remote certificate.

use crate::constants::{OP_EXPORT_CERTIFICATE, OP_TYPE_READ_ONE};
use crate::controller::certificate::decrypt::decrypt_private_key;
use crate::controller::error::{HookError, TerminalReason};
use crate::controller::hooks::CertificateHooks;
use crate::controller::remote::{cancellable, recorded, ApiCall};
use crate::crd::{Certificate, ExportTarget, KeyAlgorithm};
use crate::provider::{ExportResponse, ExportedCertificate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

const OPERATION: &str = "export";

/// Secret coordinates an export was written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSecret {
    pub namespace: String,
    pub name: String,
    /// Key holding the certificate and chain
    pub certificate_key: String,
    /// Key holding the decrypted private key
    pub private_key_key: String,
}

/// Result of the export hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Export is not configured on the resource
    Skipped,
    /// Certificate and key were written
    Exported(ExportedSecret),
    /// The certificate no longer exists in ACM
    RemoteNotFound,
}

/// Concatenate the certificate and its chain into one PEM bundle
fn pem_bundle(exported: &ExportedCertificate) -> String {
    let mut bundle = exported.certificate.clone();
    if let Some(chain) = exported
        .certificate_chain
        .as_deref()
        .filter(|chain| !chain.is_empty())
    {
        bundle.push_str(chain);
    }
    bundle
}

impl CertificateHooks {
    /// Export the certificate if `exportTo` and `exportPassphrase` are set
    pub async fn maybe_export_certificate(
        &self,
        certificate: &Certificate,
        cancel: &CancellationToken,
    ) -> Result<ExportOutcome, HookError> {
        let (Some(target), Some(passphrase_ref)) = (
            certificate.spec.export_to.as_ref(),
            certificate.spec.export_passphrase.as_ref(),
        ) else {
            return Ok(ExportOutcome::Skipped);
        };

        let resource = certificate.resource_key();
        if target.name.trim().is_empty() {
            return Err(HookError::terminal(
                OPERATION,
                resource,
                TerminalReason::MissingExportDestination,
            ));
        }
        let certificate_arn = certificate.certificate_arn().ok_or_else(|| {
            HookError::missing_remote_identifier(OPERATION, resource.as_str(), "export")
        })?;

        let destination = self.export_destination(certificate, target);
        let span = info_span!(
            "certificate.export",
            resource.name = certificate.name_or_unknown(),
            resource.namespace = certificate.namespace_or_default(),
            certificate.arn = certificate_arn,
            secret.namespace = destination.namespace.as_str(),
            secret.name = destination.name.as_str()
        );

        async {
            let passphrase = self
                .resolve_secret(certificate, OPERATION, "exportPassphrase", passphrase_ref, cancel)
                .await?;
            if passphrase.is_empty() {
                return Err(HookError::terminal(
                    OPERATION,
                    resource.as_str(),
                    TerminalReason::UnresolvedSecret {
                        field: "exportPassphrase",
                        reference: passphrase_ref.to_string(),
                    },
                ));
            }

            let response = recorded(
                self.recorder.as_ref(),
                ApiCall {
                    op_type: OP_TYPE_READ_ONE,
                    op_name: OP_EXPORT_CERTIFICATE,
                },
                cancel,
                OPERATION,
                &resource,
                self.service
                    .export_certificate(certificate_arn, passphrase.as_bytes()),
            )
            .await?;

            let exported = match response {
                ExportResponse::Exported(exported) => exported,
                ExportResponse::NotFound => {
                    warn!(
                        "Certificate {} of {} was not found in ACM, skipping export",
                        certificate_arn, resource
                    );
                    return Ok(ExportOutcome::RemoteNotFound);
                }
            };

            self.write_entry(
                &resource,
                &destination,
                &destination.certificate_key,
                &pem_bundle(&exported),
                cancel,
            )
            .await?;
            debug!(
                "Wrote certificate to {}/{} key {}",
                destination.namespace, destination.name, destination.certificate_key
            );

            let family = certificate
                .spec
                .key_algorithm
                .as_ref()
                .map(KeyAlgorithm::family);
            let private_key =
                decrypt_private_key(exported.private_key.as_bytes(), passphrase.as_bytes(), family)
                    .map_err(|e| {
                        HookError::terminal(OPERATION, resource.as_str(), TerminalReason::from(e))
                    })?;

            self.write_entry(
                &resource,
                &destination,
                &destination.private_key_key,
                &private_key,
                cancel,
            )
            .await?;

            info!(
                "Exported certificate {} to secret {}/{}",
                certificate_arn, destination.namespace, destination.name
            );
            Ok(ExportOutcome::Exported(destination.clone()))
        }
        .instrument(span)
        .await
    }

    /// Secret coordinates for an export target
    ///
    /// An empty target namespace means the namespace of the resource.
    fn export_destination(
        &self,
        certificate: &Certificate,
        target: &ExportTarget,
    ) -> ExportedSecret {
        let namespace = if target.namespace.is_empty() {
            certificate.namespace_or_default().to_string()
        } else {
            target.namespace.clone()
        };
        let certificate_key = if target.key.is_empty() {
            self.config.default_export_certificate_key.clone()
        } else {
            target.key.clone()
        };

        ExportedSecret {
            namespace,
            name: target.name.clone(),
            certificate_key,
            private_key_key: self.config.export_private_key_key.clone(),
        }
    }

    async fn write_entry(
        &self,
        resource: &str,
        destination: &ExportedSecret,
        key: &str,
        value: &str,
        cancel: &CancellationToken,
    ) -> Result<(), HookError> {
        let write = self.writer.write_secret_entry(
            &destination.namespace,
            &destination.name,
            key,
            value,
        );
        cancellable(cancel, OPERATION, resource, write)
            .await?
            .map_err(|e| HookError::retryable(OPERATION, resource, e))
    }
}
