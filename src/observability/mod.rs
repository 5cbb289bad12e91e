//! # Observability
//!
//! - `logging`: tracing subscriber setup
//! - `metrics`: Prometheus metrics for ACM API calls

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{
    api_call_recorder, gather_metrics, register_metrics, NoopApiCallRecorder,
    PrometheusApiCallRecorder,
};
