//! # Hook Errors
//!
//! Failures are either **terminal** (the resource cannot become valid without
//! a user edit, so the driver must not retry) or **retryable** (transport or
//! remote API failures, safe to re-run the whole hook). Cancellation is
//! reported separately and is retryable.

use crate::controller::certificate::decrypt::KeyDecryptionError;
use thiserror::Error;

/// Reason a hook failed terminally
#[derive(Debug, Error)]
pub enum TerminalReason {
    #[error(
        "cannot set fields used for requesting a certificate ({request_fields}) when importing a certificate ({import_fields})"
    )]
    ConflictingMode {
        import_fields: String,
        request_fields: String,
    },

    #[error(
        "certificate must either request a certificate (domainName) or import one (certificate, privateKey)"
    )]
    MissingAcquisitionMode,

    #[error("{field} is required when importing a certificate")]
    MissingImportField { field: &'static str },

    #[error(
        "certificate cannot have more than {limit} domain validation options when requesting a public certificate (got {count})"
    )]
    TooManyValidationOptions { count: usize, limit: usize },

    #[error("exporting a certificate requires the exportPassphrase field")]
    MissingExportPassphrase,

    #[error("exporting a certificate requires a non-empty exportTo.name")]
    MissingExportDestination,

    #[error("could not resolve {field} secret reference {reference}")]
    UnresolvedSecret {
        field: &'static str,
        reference: String,
    },

    #[error(transparent)]
    KeyDecryption(#[from] KeyDecryptionError),
}

/// Error returned by the certificate hooks
///
/// Carries the operation and resource so the driver can log and report
/// status without re-deriving them.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{operation} failed for {resource}: {reason}")]
    Terminal {
        operation: &'static str,
        resource: String,
        #[source]
        reason: TerminalReason,
    },

    #[error("{operation} failed for {resource}: {source:#}")]
    Retryable {
        operation: &'static str,
        resource: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{operation} cancelled for {resource}")]
    Cancelled {
        operation: &'static str,
        resource: String,
    },
}

impl HookError {
    pub fn terminal(
        operation: &'static str,
        resource: impl Into<String>,
        reason: TerminalReason,
    ) -> Self {
        HookError::Terminal {
            operation,
            resource: resource.into(),
            reason,
        }
    }

    pub fn retryable(
        operation: &'static str,
        resource: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        HookError::Retryable {
            operation,
            resource: resource.into(),
            source,
        }
    }

    /// The certificate has no ARN yet
    ///
    /// Retryable: the ARN is written by the create path and shows up on a
    /// later read without any edit to the resource.
    pub fn missing_remote_identifier(
        operation: &'static str,
        resource: impl Into<String>,
        action: &'static str,
    ) -> Self {
        HookError::retryable(
            operation,
            resource,
            anyhow::anyhow!("certificate has no ARN yet, cannot {action}"),
        )
    }

    pub fn cancelled(operation: &'static str, resource: impl Into<String>) -> Self {
        HookError::Cancelled {
            operation,
            resource: resource.into(),
        }
    }

    /// The resource cannot become valid without a user edit
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, HookError::Terminal { .. })
    }

    /// Re-running the hook with unchanged inputs may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !self.is_terminal()
    }

    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            HookError::Terminal { operation, .. }
            | HookError::Retryable { operation, .. }
            | HookError::Cancelled { operation, .. } => operation,
        }
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        match self {
            HookError::Terminal { resource, .. }
            | HookError::Retryable { resource, .. }
            | HookError::Cancelled { resource, .. } => resource,
        }
    }

    /// Terminal reason, if any
    #[must_use]
    pub fn terminal_reason(&self) -> Option<&TerminalReason> {
        match self {
            HookError::Terminal { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Get classification label for logs and metrics
    #[must_use]
    pub fn classification(&self) -> &'static str {
        match self {
            HookError::Terminal { .. } => "terminal",
            HookError::Retryable { .. } => "retryable",
            HookError::Cancelled { .. } => "cancelled",
        }
    }
}
