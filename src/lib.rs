//! ACM Certificate Controller Library
//!
//! Business-rule hooks for keeping ACM certificates in sync with their
//! Kubernetes `Certificate` resources: acquisition-mode validation, import of
//! user supplied certificates, export of issued certificates into Secrets,
//! tag reconciliation and issuance drift detection.
//!
//! ## Quick Start
//!
//! ```rust
//! use acm_certificate_controller::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod provider;
