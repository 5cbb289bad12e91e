//! # Certificate
//!
//! Hooks specific to the Certificate resource.

pub mod decrypt;
pub mod drift;
pub mod export;
pub mod import;
pub mod validation;

pub use decrypt::{decrypt_private_key, KeyDecryptionError};
pub use drift::compare_issued_at;
pub use export::{ExportOutcome, ExportedSecret};
pub use import::ImportOutcome;
pub use validation::{
    validate_export_options, validate_public_validation_options, validate_request_mode,
    AcquisitionMode,
};
