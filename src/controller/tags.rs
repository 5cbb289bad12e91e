//! # Tag Reconciliation
//!
//! Computes the minimal set of tag changes between the desired and observed
//! tags of a certificate and applies them to ACM.
//!
//! Removals are issued before additions. AddTagsToCertificate overwrites the
//! value of an existing key, so a changed value is an add, never a
//! remove followed by an add.

use crate::constants::{OP_ADD_TAGS, OP_LIST_TAGS, OP_REMOVE_TAGS, OP_TYPE_GET, OP_TYPE_UPDATE};
use crate::controller::error::HookError;
use crate::controller::remote::{recorded, ApiCall};
use crate::crd::TagSet;
use crate::provider::{ApiCallRecorder, CertificateService};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

const SYNC_OPERATION: &str = "sync_tags";
const LIST_OPERATION: &str = "list_tags";

/// Tag changes needed to turn the observed set into the desired set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// New keys and keys whose value changed, with the desired value
    pub to_add: TagSet,
    /// Keys no longer desired, with their observed value
    pub to_remove: TagSet,
}

impl TagDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the tag changes between `desired` and `observed`
#[must_use]
pub fn compute_tag_diff(desired: &TagSet, observed: &TagSet) -> TagDiff {
    let to_add = desired
        .iter()
        .filter(|(key, value)| observed.get(key) != Some(*value))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let to_remove = observed
        .iter()
        .filter(|(key, _)| !desired.contains_key(key))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    TagDiff { to_add, to_remove }
}

/// Reconcile the tags of `certificate_arn`
///
/// Issues at most one RemoveTagsFromCertificate call followed by at most one
/// AddTagsToCertificate call. Returns the applied changes.
pub async fn sync_tags(
    service: &dyn CertificateService,
    recorder: &dyn ApiCallRecorder,
    certificate_arn: &str,
    desired: &TagSet,
    observed: &TagSet,
    cancel: &CancellationToken,
) -> Result<TagDiff, HookError> {
    let diff = compute_tag_diff(desired, observed);
    let span = info_span!(
        "certificate.tags.sync",
        certificate.arn = certificate_arn,
        tags.add = diff.to_add.len(),
        tags.remove = diff.to_remove.len()
    );

    async {
        if !diff.to_remove.is_empty() {
            for key in diff.to_remove.keys() {
                debug!("removing tag from resource: {}", key);
            }
            recorded(
                recorder,
                ApiCall {
                    op_type: OP_TYPE_UPDATE,
                    op_name: OP_REMOVE_TAGS,
                },
                cancel,
                SYNC_OPERATION,
                certificate_arn,
                service.remove_tags(certificate_arn, &diff.to_remove),
            )
            .await?;
        }

        if !diff.to_add.is_empty() {
            for key in diff.to_add.keys() {
                debug!("adding tag to resource: {}", key);
            }
            recorded(
                recorder,
                ApiCall {
                    op_type: OP_TYPE_UPDATE,
                    op_name: OP_ADD_TAGS,
                },
                cancel,
                SYNC_OPERATION,
                certificate_arn,
                service.add_tags(certificate_arn, &diff.to_add),
            )
            .await?;
        }

        Ok(diff)
    }
    .instrument(span)
    .await
}

/// List the tags ACM currently holds for `certificate_arn`
pub async fn list_tags(
    service: &dyn CertificateService,
    recorder: &dyn ApiCallRecorder,
    certificate_arn: &str,
    cancel: &CancellationToken,
) -> Result<TagSet, HookError> {
    recorded(
        recorder,
        ApiCall {
            op_type: OP_TYPE_GET,
            op_name: OP_LIST_TAGS,
        },
        cancel,
        LIST_OPERATION,
        certificate_arn,
        service.list_tags(certificate_arn),
    )
    .await
}
