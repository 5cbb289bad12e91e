//! # Certificate Import
//!
//! Imports user supplied certificate material into ACM when the resource is
//! in import mode.

use crate::constants::{OP_IMPORT_CERTIFICATE, OP_TYPE_CREATE};
use crate::controller::certificate::validation::{validate_request_mode, AcquisitionMode};
use crate::controller::error::{HookError, TerminalReason};
use crate::controller::hooks::CertificateHooks;
use crate::controller::remote::{recorded, ApiCall};
use crate::crd::{Certificate, TagSet};
use crate::provider::ImportRequest;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};
use zeroize::Zeroizing;

const OPERATION: &str = "import";

/// Result of a successful import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Desired resource merged with the import result
    pub resource: Certificate,
    /// A new certificate was created in ACM
    pub created: bool,
}

impl CertificateHooks {
    /// Import the certificate if the resource is in import mode
    ///
    /// Returns `None` for any other acquisition mode; the standard request
    /// path creates those. On success the returned resource carries the new
    /// certificate ARN, and the hook waits the configured post-create delay
    /// before returning.
    pub async fn maybe_import_certificate(
        &self,
        desired: &Certificate,
        cancel: &CancellationToken,
    ) -> Result<Option<ImportOutcome>, HookError> {
        let resource = desired.resource_key();
        let mode = validate_request_mode(desired)
            .map_err(|reason| HookError::terminal(OPERATION, resource.as_str(), reason))?;
        if mode != AcquisitionMode::Import {
            return Ok(None);
        }

        let span = info_span!(
            "certificate.import",
            resource.name = desired.name_or_unknown(),
            resource.namespace = desired.namespace_or_default()
        );

        async {
            let request = self.build_import_request(desired, cancel).await?;
            debug!("Importing certificate for {}: {:?}", resource, request);

            let response = recorded(
                self.recorder.as_ref(),
                ApiCall {
                    op_type: OP_TYPE_CREATE,
                    op_name: OP_IMPORT_CERTIFICATE,
                },
                cancel,
                OPERATION,
                &resource,
                self.service.import_certificate(request),
            )
            .await?;

            let mut imported = desired.clone();
            let status = imported.status.get_or_insert_with(Default::default);
            status.certificate_arn = Some(response.certificate_arn.clone());
            if status.tags.is_empty() {
                status.tags.clone_from(&desired.spec.tags);
            }

            info!(
                "Imported certificate {} for {}",
                response.certificate_arn, resource
            );

            // ACM does not serve a freshly imported certificate immediately
            tokio::time::sleep(self.config.post_create_delay()).await;

            Ok(Some(ImportOutcome {
                resource: imported,
                created: true,
            }))
        }
        .instrument(span)
        .await
    }

    /// Resolve the import-only secret references into an import request
    async fn build_import_request(
        &self,
        desired: &Certificate,
        cancel: &CancellationToken,
    ) -> Result<ImportRequest, HookError> {
        let spec = &desired.spec;
        let missing = |field| {
            HookError::terminal(
                OPERATION,
                desired.resource_key(),
                TerminalReason::MissingImportField { field },
            )
        };

        let certificate_ref = spec
            .certificate
            .as_ref()
            .ok_or_else(|| missing("certificate"))?;
        let private_key_ref = spec
            .private_key
            .as_ref()
            .ok_or_else(|| missing("privateKey"))?;

        let certificate = self
            .resolve_secret(desired, OPERATION, "certificate", certificate_ref, cancel)
            .await?;
        if certificate.is_empty() {
            return Err(missing("certificate"));
        }

        let private_key = self
            .resolve_secret(desired, OPERATION, "privateKey", private_key_ref, cancel)
            .await?;
        if private_key.is_empty() {
            return Err(missing("privateKey"));
        }

        let certificate_chain = match spec.certificate_chain.as_ref() {
            Some(chain_ref) => {
                let chain = self
                    .resolve_secret(desired, OPERATION, "certificateChain", chain_ref, cancel)
                    .await?;
                (!chain.is_empty()).then(|| chain.as_bytes().to_vec())
            }
            None => None,
        };

        Ok(ImportRequest {
            certificate: certificate.as_bytes().to_vec(),
            certificate_chain,
            private_key: Zeroizing::new(private_key.as_bytes().to_vec()),
            tags: TagSet::from_tags(&spec.tags),
        })
    }
}
