//! Fault-to-outcome conversion for sub-fetches

use super::error::{PreviewError, Result};
use super::types::FetchOutcome;
use std::future::Future;

/// Await `operation` and reduce its result to a [`FetchOutcome`]
///
/// Faults and cancellation are logged and swallowed so that a join over
/// several sub-fetches always sees every branch finish. Side effects the
/// operation performed before failing are kept.
pub async fn run_safe<F>(label: &str, operation: F) -> FetchOutcome
where
    F: Future<Output = Result<()>>,
{
    match operation.await {
        Ok(()) => {
            tracing::debug!(fetch = label, "fetch succeeded");
            FetchOutcome::Succeeded
        }
        Err(e) if e.is_cancelled() => {
            tracing::debug!(fetch = label, "fetch cancelled");
            FetchOutcome::Failed
        }
        Err(PreviewError::Superseded) => {
            tracing::debug!(fetch = label, "fetch result skipped, load superseded");
            FetchOutcome::Failed
        }
        Err(e) => {
            tracing::debug!(fetch = label, error = %e, "fetch failed");
            FetchOutcome::Failed
        }
    }
}
