//! # Certificate Spec
//!
//! Desired state of an ACM certificate.

use serde::{Deserialize, Serialize};

use crate::crd::{KeyAlgorithm, Tag};

/// Certificate Custom Resource Definition
///
/// A certificate is acquired in exactly one of two modes:
/// - **request**: ACM issues a certificate for `domainName`, validated via DNS
/// - **import**: the caller supplies the certificate, chain and private key
///
/// Issued certificates can optionally be exported (with their private key)
/// into a Kubernetes Secret.
///
/// # Example
///
/// ```yaml
/// apiVersion: acm.services.k8s.aws/v1alpha1
/// kind: Certificate
/// metadata:
///   name: my-service-cert
///   namespace: default
/// spec:
///   domainName: my-service.example.com
///   keyAlgorithm: RSA_2048
///   exportTo:
///     name: my-service-tls
///   exportPassphrase:
///     name: export-passphrase
///     key: passphrase
///   tags:
///     - key: team
///       value: platform
/// ```
#[derive(
    kube::CustomResource, Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema,
)]
#[kube(
    kind = "Certificate",
    group = "acm.services.k8s.aws",
    version = "v1alpha1",
    namespaced,
    status = "crate::crd::CertificateStatus",
    printcolumn = r#"{"name":"Domain", "type":"string", "jsonPath":".spec.domainName"}, {"name":"Status", "type":"string", "jsonPath":".status.status"}, {"name":"IssuedAt", "type":"string", "jsonPath":".status.issuedAt"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSpec {
    /// Fully qualified domain name to request a certificate for
    #[serde(default)]
    pub domain_name: Option<String>,
    /// Additional FQDNs to include in the Subject Alternative Name extension
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    /// Algorithm of the public and private key pair
    #[serde(default)]
    pub key_algorithm: Option<KeyAlgorithm>,
    /// Domain names and validation domains used for DNS validation
    #[serde(default)]
    pub domain_validation_options: Vec<DomainValidationOption>,
    /// ARN of the private CA that issues the certificate
    /// When absent the request is for a public certificate
    #[serde(rename = "certificateAuthorityARN", default)]
    pub certificate_authority_arn: Option<String>,
    /// Request options
    #[serde(default)]
    pub options: Option<CertificateOptions>,
    /// PEM certificate to import
    #[serde(default)]
    pub certificate: Option<SecretKeyReference>,
    /// PEM certificate chain to import
    #[serde(default)]
    pub certificate_chain: Option<SecretKeyReference>,
    /// PEM private key of the certificate to import
    #[serde(default)]
    pub private_key: Option<SecretKeyReference>,
    /// Secret to export the issued certificate and its private key to
    #[serde(default)]
    pub export_to: Option<ExportTarget>,
    /// Passphrase used to encrypt the private key during export
    #[serde(default)]
    pub export_passphrase: Option<SecretKeyReference>,
    /// Tags to associate with the certificate
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Domain name and the domain ACM sends validation for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainValidationOption {
    pub domain_name: String,
    pub validation_domain: String,
}

/// Certificate request options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOptions {
    /// ENABLED or DISABLED
    #[serde(default)]
    pub certificate_transparency_logging_preference: Option<String>,
}

/// Reference to a key inside a Kubernetes Secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyReference {
    /// Secret name
    pub name: String,
    /// Secret namespace, defaults to the namespace of the Certificate
    #[serde(default)]
    pub namespace: Option<String>,
    /// Key within the Secret data
    pub key: String,
}

/// Export destination
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportTarget {
    /// Secret namespace, empty means the namespace of the Certificate
    #[serde(default)]
    pub namespace: String,
    /// Secret name
    pub name: String,
    /// Secret key for the certificate and chain
    #[serde(default = "default_export_key")]
    pub key: String,
}

/// Default Secret key for the exported certificate
pub fn default_export_key() -> String {
    crate::constants::DEFAULT_EXPORT_CERTIFICATE_KEY.to_string()
}

impl SecretKeyReference {
    /// Namespace to read the Secret from
    #[must_use]
    pub fn namespace_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(fallback)
    }
}

impl std::fmt::Display for SecretKeyReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => write!(f, "{}/{}#{}", ns, self.name, self.key),
            _ => write!(f, "{}#{}", self.name, self.key),
        }
    }
}

impl Certificate {
    /// `namespace/name` of the resource, used in errors and logs
    #[must_use]
    pub fn resource_key(&self) -> String {
        format!("{}/{}", self.namespace_or_default(), self.name_or_unknown())
    }

    #[must_use]
    pub fn name_or_unknown(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    #[must_use]
    pub fn namespace_or_default(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or("default")
    }

    /// ARN of the certificate in ACM, if it has been created
    #[must_use]
    pub fn certificate_arn(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.certificate_arn.as_deref())
            .filter(|arn| !arn.is_empty())
    }
}
