//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use acm_certificate_controller::prelude::*;
//! ```
//!
//! This brings into scope:
//! - All CRD types (Certificate, CertificateSpec, TagSet, etc.)
//! - Collaborator traits (CertificateService, SecretResolver, SecretWriter, ApiCallRecorder)
//! - The hooks and their outcomes
//! - Config and error types

// CRD types - most commonly used
pub use crate::crd::*;

// Collaborator traits - needed for implementing providers
pub use crate::provider::{
    ApiCallRecorder, CertificateService, ExportResponse, ExportedCertificate, ImportRequest,
    ImportResponse, SecretResolver, SecretWriter,
};

// Hooks - core controller functionality
pub use crate::controller::certificate::{
    compare_issued_at, decrypt_private_key, AcquisitionMode, ExportOutcome, ExportedSecret,
    ImportOutcome, KeyDecryptionError,
};
pub use crate::controller::compare::{Delta, Difference};
pub use crate::controller::hooks::CertificateHooks;
pub use crate::controller::tags::{compute_tag_diff, TagDiff};

// Config types - for configuration management
pub use crate::config::ControllerConfig;

// Common error types
pub use crate::controller::error::{HookError, TerminalReason};

// Provider implementations
pub use crate::provider::aws::AcmCertificateService;
pub use crate::provider::kubernetes::KubeSecretStore;
