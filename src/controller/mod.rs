//! # Controller
//!
//! Certificate business rules invoked by the reconciliation driver.
//!
//! - `certificate`: validation, import, export, key decryption and issuance drift
//! - `compare`: differences between desired and observed resources
//! - `error`: terminal, retryable and cancelled hook failures
//! - `hooks`: `CertificateHooks`, the entry point for every hook
//! - `tags`: tag reconciliation against ACM

pub mod certificate;
pub mod compare;
pub mod error;
pub mod hooks;
mod remote;
pub mod tags;
