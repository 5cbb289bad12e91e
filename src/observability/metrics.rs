//! # Metrics
//!
//! Prometheus metrics for the remote calls the certificate hooks make.
//!
//! ## Metrics Exposed
//!
//! - `acm_controller_api_calls_total` - Total number of ACM API call attempts by operation
//! - `acm_controller_api_call_errors_total` - Total number of failed ACM API call attempts by operation

use crate::config::ControllerConfig;
use crate::provider::ApiCallRecorder;
use anyhow::Result;
use prometheus::{Encoder, IntCounterVec, Registry, TextEncoder};
use std::sync::{Arc, LazyLock};
use tracing::debug;

// Metrics
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static API_CALLS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "acm_controller_api_calls_total",
            "Total number of ACM API call attempts by operation",
        ),
        &["op_type", "op_name"],
    )
    .expect("Failed to create API_CALLS_TOTAL metric - this should never happen")
});

static API_CALL_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "acm_controller_api_call_errors_total",
            "Total number of failed ACM API call attempts by operation",
        ),
        &["op_type", "op_name"],
    )
    .expect("Failed to create API_CALL_ERRORS_TOTAL metric - this should never happen")
});

/// Register all metrics with the crate registry
///
/// Safe to call more than once.
///
/// # Errors
///
/// Returns an error if a metric conflicts with one already in the registry.
pub fn register_metrics() -> Result<()> {
    for collector in [API_CALLS_TOTAL.clone(), API_CALL_ERRORS_TOTAL.clone()] {
        match REGISTRY.register(Box::new(collector)) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Encode all registered metrics in the Prometheus text format
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Count one API call attempt, and one error if it failed
pub fn record_api_call(op_type: &str, op_name: &str, failed: bool) {
    API_CALLS_TOTAL.with_label_values(&[op_type, op_name]).inc();
    if failed {
        API_CALL_ERRORS_TOTAL
            .with_label_values(&[op_type, op_name])
            .inc();
    }
}

/// `ApiCallRecorder` backed by the Prometheus counters
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusApiCallRecorder;

impl ApiCallRecorder for PrometheusApiCallRecorder {
    fn record_api_call(&self, op_type: &str, op_name: &str, error: Option<&anyhow::Error>) {
        if let Some(e) = error {
            debug!("{} {} failed: {:#}", op_type, op_name, e);
        }
        record_api_call(op_type, op_name, error.is_some());
    }
}

/// `ApiCallRecorder` used when metrics are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopApiCallRecorder;

impl ApiCallRecorder for NoopApiCallRecorder {
    fn record_api_call(&self, _op_type: &str, _op_name: &str, _error: Option<&anyhow::Error>) {}
}

/// Build the recorder selected by `enable_metrics`
#[must_use]
pub fn api_call_recorder(config: &ControllerConfig) -> Arc<dyn ApiCallRecorder> {
    if config.enable_metrics {
        Arc::new(PrometheusApiCallRecorder)
    } else {
        Arc::new(NoopApiCallRecorder)
    }
}
