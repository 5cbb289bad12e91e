//! # Logging
//!
//! Installs the global `tracing` subscriber.

use crate::config::ControllerConfig;
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
fn default_filter(config: &ControllerConfig) -> String {
    format!(
        "acm_certificate_controller={}",
        config.log_level.trim().to_lowercase()
    )
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL`. `LOG_FORMAT=json` selects
/// structured JSON output, anything else plain text. Calling this again after
/// a subscriber is installed is a no-op.
///
/// # Errors
///
/// Returns an error if the fallback filter built from `LOG_LEVEL` is invalid.
pub fn init_logging(config: &ControllerConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter(config))
            .with_context(|| format!("Invalid log level '{}'", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_lowercase_level() {
        let config = ControllerConfig {
            log_level: "DEBUG".to_string(),
            ..ControllerConfig::default()
        };
        assert_eq!(default_filter(&config), "acm_certificate_controller=debug");
    }

    #[test]
    fn test_init_logging_twice_is_ok() {
        let config = ControllerConfig::default();
        init_logging(&config).unwrap();
        init_logging(&config).unwrap();
    }
}
