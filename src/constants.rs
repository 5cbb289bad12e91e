//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Maximum number of domain validation options on a public certificate request
/// DNS validation only works for up to 5 chained CNAME records
pub const LIMIT_DOMAIN_VALIDATION_OPTIONS_PUBLIC: usize = 5;

/// Default Secret key holding the exported certificate and its chain
pub const DEFAULT_EXPORT_CERTIFICATE_KEY: &str = "tls.crt";

/// Secret key holding the exported, decrypted private key
pub const DEFAULT_EXPORT_PRIVATE_KEY_KEY: &str = "tls.key";

/// Default delay after a successful create call before the new certificate is checked (seconds)
/// ACM does not return a freshly imported certificate from Describe/Export immediately
pub const DEFAULT_POST_CREATE_DELAY_SECS: u64 = 5;

/// Default field manager used for Secret writes
pub const DEFAULT_FIELD_MANAGER: &str = "acm-certificate-controller";

/// Delta path used to surface issuance and renewal as a spec change
/// The driver only enters the update path for differences rooted under `Spec`
pub const ISSUED_AT_DELTA_PATH: &str = "Spec.Status.IssuedAt";

/// Operation types passed to the API call recorder
pub const OP_TYPE_CREATE: &str = "CREATE";
pub const OP_TYPE_READ_ONE: &str = "READ_ONE";
pub const OP_TYPE_UPDATE: &str = "UPDATE";
pub const OP_TYPE_GET: &str = "GET";

/// Remote operation names passed to the API call recorder
pub const OP_IMPORT_CERTIFICATE: &str = "ImportCertificate";
pub const OP_EXPORT_CERTIFICATE: &str = "ExportCertificate";
pub const OP_ADD_TAGS: &str = "AddTagsToCertificate";
pub const OP_REMOVE_TAGS: &str = "RemoveTagsFromCertificate";
pub const OP_LIST_TAGS: &str = "ListTagsForCertificate";
