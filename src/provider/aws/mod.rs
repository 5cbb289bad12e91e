//! # AWS Certificate Manager Client
//!
//! Client for interacting with the AWS Certificate Manager (ACM) API.
//!
//! This module provides functionality to:
//! - Import externally supplied certificates
//! - Export issued certificates with their encrypted private key
//! - Add, remove and list certificate tags
//! - Support IRSA (IAM Roles for Service Accounts) authentication through the
//!   SDK default credential chain

use crate::crd::TagSet;
use crate::provider::{
    CertificateService, ExportResponse, ExportedCertificate, ImportRequest, ImportResponse,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_acm::operation::export_certificate::ExportCertificateError;
use aws_sdk_acm::primitives::Blob;
use aws_sdk_acm::types::Tag as AcmTag;
use aws_sdk_acm::Client as AcmClient;
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};

/// ACM provider implementation
pub struct AcmCertificateService {
    client: AcmClient,
    region: Option<String>,
}

impl std::fmt::Debug for AcmCertificateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcmCertificateService")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AcmCertificateService {
    /// Create a new ACM client
    /// Uses the SDK default credential chain, which picks up IRSA from the
    /// pod's service account when running in EKS
    pub async fn new(region: Option<&str>) -> Result<Self> {
        let sdk_config = Self::create_default_config(region).await;
        if region.is_none() && sdk_config.region().is_none() {
            return Err(anyhow::anyhow!(
                "No AWS region configured: set AWS_REGION or configure a default region"
            ));
        }
        info!(
            "Using ACM in region {}",
            sdk_config
                .region()
                .map_or_else(|| "unknown".to_string(), ToString::to_string)
        );

        Ok(Self {
            client: AcmClient::new(&sdk_config),
            region: region.map(str::to_string),
        })
    }

    /// Wrap an existing SDK client
    pub fn from_client(client: AcmClient) -> Self {
        Self {
            client,
            region: None,
        }
    }

    /// Create AWS SDK config using default credential chain
    async fn create_default_config(region: Option<&str>) -> SdkConfig {
        let loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        let loader = match region {
            Some(region) => loader.region(aws_config::Region::new(region.to_string())),
            None => loader,
        };
        loader.load().await
    }
}

/// Convert a tag set into ACM tags
fn to_acm_tags(tags: &TagSet) -> Result<Vec<AcmTag>> {
    tags.iter()
        .map(|(key, value)| {
            AcmTag::builder()
                .key(key)
                .value(value)
                .build()
                .with_context(|| format!("Failed to build ACM tag {key}"))
        })
        .collect()
}

/// Convert ACM tags into a tag set
fn from_acm_tags(tags: &[AcmTag]) -> TagSet {
    tags.iter()
        .map(|tag| {
            (
                tag.key().to_string(),
                tag.value().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[async_trait]
impl CertificateService for AcmCertificateService {
    async fn import_certificate(&self, request: ImportRequest) -> Result<ImportResponse> {
        let span = info_span!("aws.acm.import_certificate", tags = request.tags.len());
        let start = Instant::now();

        async move {
            let tags = to_acm_tags(&request.tags)?;
            let response = self
                .client
                .import_certificate()
                .certificate(Blob::new(request.certificate))
                .private_key(Blob::new(request.private_key.to_vec()))
                .set_certificate_chain(request.certificate_chain.map(Blob::new))
                .set_tags((!tags.is_empty()).then_some(tags))
                .send()
                .await
                .context("Failed to import certificate into ACM")?;

            let certificate_arn = response
                .certificate_arn()
                .context("ImportCertificate response did not include a certificate ARN")?
                .to_string();

            debug!(
                "Imported certificate {} in {}ms",
                certificate_arn,
                start.elapsed().as_millis()
            );
            Ok(ImportResponse { certificate_arn })
        }
        .instrument(span)
        .await
    }

    async fn export_certificate(
        &self,
        certificate_arn: &str,
        passphrase: &[u8],
    ) -> Result<ExportResponse> {
        let span = info_span!(
            "aws.acm.export_certificate",
            certificate.arn = certificate_arn
        );
        let start = Instant::now();

        async move {
            let result = self
                .client
                .export_certificate()
                .certificate_arn(certificate_arn)
                .passphrase(Blob::new(passphrase.to_vec()))
                .send()
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    let not_found = e
                        .as_service_error()
                        .is_some_and(ExportCertificateError::is_resource_not_found_exception);
                    if not_found {
                        debug!("Certificate {} not found in ACM", certificate_arn);
                        return Ok(ExportResponse::NotFound);
                    }
                    return Err(anyhow::Error::new(e)
                        .context(format!("Failed to export certificate {certificate_arn}")));
                }
            };

            let certificate = response
                .certificate()
                .context("ExportCertificate response did not include a certificate")?
                .to_string();
            let private_key = response
                .private_key()
                .context("ExportCertificate response did not include a private key")?
                .to_string();
            let certificate_chain = response.certificate_chain().map(str::to_string);

            debug!(
                "Exported certificate {} in {}ms",
                certificate_arn,
                start.elapsed().as_millis()
            );
            Ok(ExportResponse::Exported(ExportedCertificate {
                certificate,
                certificate_chain,
                private_key,
            }))
        }
        .instrument(span)
        .await
    }

    async fn add_tags(&self, certificate_arn: &str, tags: &TagSet) -> Result<()> {
        self.client
            .add_tags_to_certificate()
            .certificate_arn(certificate_arn)
            .set_tags(Some(to_acm_tags(tags)?))
            .send()
            .await
            .with_context(|| format!("Failed to add tags to certificate {certificate_arn}"))?;
        Ok(())
    }

    async fn remove_tags(&self, certificate_arn: &str, tags: &TagSet) -> Result<()> {
        self.client
            .remove_tags_from_certificate()
            .certificate_arn(certificate_arn)
            .set_tags(Some(to_acm_tags(tags)?))
            .send()
            .await
            .with_context(|| {
                format!("Failed to remove tags from certificate {certificate_arn}")
            })?;
        Ok(())
    }

    async fn list_tags(&self, certificate_arn: &str) -> Result<TagSet> {
        let response = self
            .client
            .list_tags_for_certificate()
            .certificate_arn(certificate_arn)
            .send()
            .await
            .with_context(|| format!("Failed to list tags of certificate {certificate_arn}"))?;
        Ok(from_acm_tags(response.tags()))
    }
}
