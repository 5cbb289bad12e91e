//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Environment variables are populated from a ConfigMap using `envFrom` in the deployment.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay after a successful create call (seconds)
    /// Gives ACM time to make the new certificate queryable
    pub post_create_delay_secs: u64,
    /// Secret key for the exported certificate when `exportTo.key` is empty
    pub default_export_certificate_key: String,
    /// Secret key for the exported private key
    pub export_private_key_key: String,
    /// AWS region for ACM
    /// When unset the SDK default region chain is used
    pub aws_region: Option<String>,
    /// Field manager recorded on Secret writes
    pub field_manager: String,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            post_create_delay_secs: DEFAULT_POST_CREATE_DELAY_SECS,
            default_export_certificate_key: DEFAULT_EXPORT_CERTIFICATE_KEY.to_string(),
            export_private_key_key: DEFAULT_EXPORT_PRIVATE_KEY_KEY.to_string(),
            aws_region: None,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            enable_metrics: true,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        Self {
            post_create_delay_secs: env_var_or_default(
                "POST_CREATE_DELAY_SECS",
                DEFAULT_POST_CREATE_DELAY_SECS,
            ),
            default_export_certificate_key: env_var_or_default_str(
                "EXPORT_CERTIFICATE_KEY",
                DEFAULT_EXPORT_CERTIFICATE_KEY,
            ),
            export_private_key_key: env_var_or_default_str(
                "EXPORT_PRIVATE_KEY_KEY",
                DEFAULT_EXPORT_PRIVATE_KEY_KEY,
            ),
            aws_region: std::env::var("AWS_REGION")
                .ok()
                .filter(|region| !region.trim().is_empty()),
            field_manager: env_var_or_default_str("FIELD_MANAGER", DEFAULT_FIELD_MANAGER),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            enable_metrics: env_var_or_default_bool("ENABLE_METRICS", true),
        }
    }

    /// Get post-create delay duration
    pub fn post_create_delay(&self) -> Duration {
        Duration::from_secs(self.post_create_delay_secs)
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    let v_lower = value.to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
