//! # Custom Resource Definitions
//!
//! CRD types for the ACM Certificate controller.
//!
//! The `Certificate` resource composes two halves: the desired state in
//! `spec` (what the user asked for) and the observed state in `status`
//! (what ACM reported on the last read). Hooks treat both as read-only views.
//!
//! ## Module Structure
//!
//! - `spec.rs` - Certificate specification (desired state)
//! - `status.rs` - Status types for observed ACM state
//! - `key_algorithm.rs` - Key algorithm enumeration and key families
//! - `tag.rs` - Tags and tag sets

mod key_algorithm;
mod spec;
mod status;
mod tag;

// Re-export all public types
pub use key_algorithm::{EcCurve, KeyAlgorithm, KeyFamily};
pub use spec::{
    default_export_key, Certificate, CertificateOptions, CertificateSpec, DomainValidationOption,
    ExportTarget, SecretKeyReference,
};
pub use status::{CertificateStatus, CertificateStatusKind, Condition};
pub use tag::{Tag, TagSet};
