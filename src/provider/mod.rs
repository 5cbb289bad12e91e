//! # Provider Modules
//!
//! Collaborators the certificate hooks depend on, expressed as traits so the
//! hooks never depend on a particular transport.
//!
//! - `CertificateService` - the remote certificate authority service (ACM)
//! - `SecretResolver` - resolves a secret reference into its plaintext value
//! - `SecretWriter` - upserts a single entry of a Kubernetes Secret
//! - `ApiCallRecorder` - records every remote call attempt for metrics

use crate::crd::{SecretKeyReference, TagSet};
use anyhow::Result;
use async_trait::async_trait;
use zeroize::Zeroizing;

/// Remote certificate service
#[async_trait]
pub trait CertificateService: Send + Sync {
    /// Import externally supplied certificate material
    async fn import_certificate(&self, request: ImportRequest) -> Result<ImportResponse>;

    /// Export an issued certificate with its passphrase-encrypted private key
    /// Returns `ExportResponse::NotFound` when the certificate no longer exists
    async fn export_certificate(
        &self,
        certificate_arn: &str,
        passphrase: &[u8],
    ) -> Result<ExportResponse>;

    /// Add tags, overwriting the value of keys that already exist
    async fn add_tags(&self, certificate_arn: &str, tags: &TagSet) -> Result<()>;

    /// Remove tags
    async fn remove_tags(&self, certificate_arn: &str, tags: &TagSet) -> Result<()>;

    /// List the tags currently associated with a certificate
    async fn list_tags(&self, certificate_arn: &str) -> Result<TagSet>;
}

/// Secret reference resolution
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolve `reference` to its plaintext value
    /// `namespace` is used when the reference does not name one
    async fn resolve_secret_value(
        &self,
        namespace: &str,
        reference: &SecretKeyReference,
    ) -> Result<Zeroizing<String>>;
}

/// Secret store write primitive
#[async_trait]
pub trait SecretWriter: Send + Sync {
    /// Write `value` under `key` in Secret `namespace/name`
    /// Creates the Secret if absent and overwrites the key if present
    async fn write_secret_entry(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
        value: &str,
    ) -> Result<()>;
}

/// Records every remote API call attempt
pub trait ApiCallRecorder: Send + Sync {
    fn record_api_call(&self, op_type: &str, op_name: &str, error: Option<&anyhow::Error>);
}

/// Payload of an ImportCertificate call
pub struct ImportRequest {
    pub certificate: Vec<u8>,
    pub certificate_chain: Option<Vec<u8>>,
    pub private_key: Zeroizing<Vec<u8>>,
    pub tags: TagSet,
}

impl std::fmt::Debug for ImportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportRequest")
            .field("certificate_len", &self.certificate.len())
            .field(
                "certificate_chain_len",
                &self.certificate_chain.as_ref().map(Vec::len),
            )
            .field("private_key", &"***")
            .field("tags", &self.tags)
            .finish()
    }
}

/// Result of an ImportCertificate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub certificate_arn: String,
}

/// Result of an ExportCertificate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResponse {
    Exported(ExportedCertificate),
    /// The certificate does not exist in the remote service
    NotFound,
}

/// Certificate material returned by ExportCertificate
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedCertificate {
    /// PEM certificate
    pub certificate: String,
    /// PEM certificate chain
    pub certificate_chain: Option<String>,
    /// PEM PKCS#8 private key, encrypted with the export passphrase
    pub private_key: String,
}

impl std::fmt::Debug for ExportedCertificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedCertificate")
            .field("certificate_len", &self.certificate.len())
            .field(
                "certificate_chain_len",
                &self.certificate_chain.as_ref().map(String::len),
            )
            .finish_non_exhaustive()
    }
}

// Provider implementations
pub mod aws;
pub mod kubernetes;
