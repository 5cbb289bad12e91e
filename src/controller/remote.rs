//! # Remote Calls
//!
//! Races collaborator calls against the caller's cancellation token.

use crate::controller::error::HookError;
use crate::provider::ApiCallRecorder;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Identifies a remote certificate-service call for the API call recorder
#[derive(Debug, Clone, Copy)]
pub(crate) struct ApiCall {
    pub op_type: &'static str,
    pub op_name: &'static str,
}

/// Run `future` unless `cancel` fires first
///
/// Returns the collaborator's own result so the caller decides how its
/// failure is classified.
pub(crate) async fn cancellable<T, F>(
    cancel: &CancellationToken,
    operation: &'static str,
    resource: &str,
    future: F,
) -> Result<anyhow::Result<T>, HookError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(HookError::cancelled(operation, resource)),
        result = future => Ok(result),
    }
}

/// Run a certificate-service call, recording exactly one attempt
///
/// A failure is retryable; a cancelled attempt is recorded as an error.
pub(crate) async fn recorded<T, F>(
    recorder: &dyn ApiCallRecorder,
    call: ApiCall,
    cancel: &CancellationToken,
    operation: &'static str,
    resource: &str,
    future: F,
) -> Result<T, HookError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match cancellable(cancel, operation, resource, future).await {
        Ok(Ok(value)) => {
            recorder.record_api_call(call.op_type, call.op_name, None);
            Ok(value)
        }
        Ok(Err(error)) => {
            recorder.record_api_call(call.op_type, call.op_name, Some(&error));
            Err(HookError::retryable(operation, resource, error))
        }
        Err(cancelled) => {
            let error = anyhow::anyhow!("{} cancelled", call.op_name);
            recorder.record_api_call(call.op_type, call.op_name, Some(&error));
            Err(cancelled)
        }
    }
}
