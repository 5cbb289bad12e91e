//! # Certificate Hooks
//!
//! Business rules the reconciliation driver invokes around the generic
//! create/read/update plumbing:
//!
//! - `validate` before create
//! - `maybe_import_certificate` on create
//! - `maybe_export_certificate` after a successful read or update
//! - `sync_tags` during update, `observe_tags` during read
//!
//! Every hook takes the driver's cancellation token and aborts the in-flight
//! remote call when it fires. Hooks never retry; the driver re-runs them.

use crate::config::ControllerConfig;
use crate::controller::certificate::validation::{
    validate_export_options, validate_public_validation_options, validate_request_mode,
    AcquisitionMode,
};
use crate::controller::error::{HookError, TerminalReason};
use crate::controller::remote::cancellable;
use crate::controller::tags;
use crate::crd::{Certificate, SecretKeyReference, TagSet};
use crate::provider::{ApiCallRecorder, CertificateService, SecretResolver, SecretWriter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use zeroize::Zeroizing;

const VALIDATE_OPERATION: &str = "validate";
const SYNC_TAGS_OPERATION: &str = "sync_tags";
const OBSERVE_TAGS_OPERATION: &str = "observe_tags";

/// Collaborators and configuration shared by all certificate hooks
#[derive(Clone)]
pub struct CertificateHooks {
    pub(crate) service: Arc<dyn CertificateService>,
    pub(crate) resolver: Arc<dyn SecretResolver>,
    pub(crate) writer: Arc<dyn SecretWriter>,
    pub(crate) recorder: Arc<dyn ApiCallRecorder>,
    pub(crate) config: ControllerConfig,
}

impl std::fmt::Debug for CertificateHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateHooks")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CertificateHooks {
    pub fn new(
        service: Arc<dyn CertificateService>,
        resolver: Arc<dyn SecretResolver>,
        writer: Arc<dyn SecretWriter>,
        recorder: Arc<dyn ApiCallRecorder>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            service,
            resolver,
            writer,
            recorder,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Validate a certificate before it is created
    ///
    /// Checks the acquisition mode, the public DNS validation fan-out limit
    /// and the export configuration. A certificate that neither requests nor
    /// imports cannot be created, so `Unspecified` is rejected here.
    pub fn validate(&self, certificate: &Certificate) -> Result<AcquisitionMode, HookError> {
        let terminal =
            |reason| HookError::terminal(VALIDATE_OPERATION, certificate.resource_key(), reason);

        let mode = validate_request_mode(certificate).map_err(terminal)?;
        if mode == AcquisitionMode::Unspecified {
            return Err(terminal(TerminalReason::MissingAcquisitionMode));
        }
        validate_public_validation_options(certificate).map_err(terminal)?;
        validate_export_options(certificate).map_err(terminal)?;
        Ok(mode)
    }

    /// Reconcile the ACM tags of `latest` towards the tags of `desired`
    ///
    /// The observed tags are the synced tags recorded in the status of
    /// `latest`. Returns `latest` with its synced tags set to the desired
    /// tags.
    pub async fn sync_tags(
        &self,
        desired: &Certificate,
        latest: &Certificate,
        cancel: &CancellationToken,
    ) -> Result<Certificate, HookError> {
        let certificate_arn = latest.certificate_arn().ok_or_else(|| {
            HookError::missing_remote_identifier(
                SYNC_TAGS_OPERATION,
                latest.resource_key(),
                "sync tags",
            )
        })?;

        let desired_tags = TagSet::from_tags(&desired.spec.tags);
        let observed_tags = latest
            .status
            .as_ref()
            .map(|status| TagSet::from_tags(&status.tags))
            .unwrap_or_default();

        tags::sync_tags(
            self.service.as_ref(),
            self.recorder.as_ref(),
            certificate_arn,
            &desired_tags,
            &observed_tags,
            cancel,
        )
        .await?;

        let mut updated = latest.clone();
        updated.status.get_or_insert_with(Default::default).tags = desired_tags.to_tags();
        Ok(updated)
    }

    /// Refresh the synced tags of `latest` from ACM
    pub async fn observe_tags(
        &self,
        latest: &Certificate,
        cancel: &CancellationToken,
    ) -> Result<Certificate, HookError> {
        let certificate_arn = latest.certificate_arn().ok_or_else(|| {
            HookError::missing_remote_identifier(
                OBSERVE_TAGS_OPERATION,
                latest.resource_key(),
                "list tags",
            )
        })?;

        let observed = tags::list_tags(
            self.service.as_ref(),
            self.recorder.as_ref(),
            certificate_arn,
            cancel,
        )
        .await?;

        let mut updated = latest.clone();
        updated.status.get_or_insert_with(Default::default).tags = observed.to_tags();
        Ok(updated)
    }

    /// Resolve a secret reference through the secret resolver
    ///
    /// A resolution failure is terminal; the returned value may be empty and
    /// the caller decides whether that is acceptable.
    pub(crate) async fn resolve_secret(
        &self,
        certificate: &Certificate,
        operation: &'static str,
        field: &'static str,
        reference: &SecretKeyReference,
        cancel: &CancellationToken,
    ) -> Result<Zeroizing<String>, HookError> {
        let resource = certificate.resource_key();
        let resolution = self
            .resolver
            .resolve_secret_value(certificate.namespace_or_default(), reference);

        match cancellable(cancel, operation, &resource, resolution).await? {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    "Failed to resolve {} secret reference {} for {}: {:#}",
                    field, reference, resource, e
                );
                Err(HookError::terminal(
                    operation,
                    resource,
                    TerminalReason::UnresolvedSecret {
                        field,
                        reference: reference.to_string(),
                    },
                ))
            }
        }
    }
}
