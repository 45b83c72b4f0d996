//! Storage query metrics.
//!
//! - `tuplegate_storage_query_duration_seconds` - query duration by operation and status
//! - `tuplegate_storage_query_timeout_total` - query timeouts by operation

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::{StorageError, StorageResult};

pub const QUERY_DURATION_METRIC: &str = "tuplegate_storage_query_duration_seconds";
pub const QUERY_TIMEOUT_METRIC: &str = "tuplegate_storage_query_timeout_total";

/// Describes the storage metrics. Call once after installing a recorder.
pub fn register_storage_metrics() {
    metrics::describe_histogram!(
        QUERY_DURATION_METRIC,
        "Storage query duration in seconds by operation and status"
    );
    metrics::describe_counter!(
        QUERY_TIMEOUT_METRIC,
        "Total number of storage query timeouts by operation"
    );
    tuplegate_domain::counter::register_counter_metrics();
}

/// Runs `future` with a timeout, recording duration and timeout metrics.
///
/// An elapsed timeout becomes `StorageError::QueryTimeout` carrying
/// `operation`.
pub async fn execute_with_timeout_and_metrics<T, F>(
    operation: &'static str,
    timeout: Duration,
    future: F,
) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    let start = Instant::now();
    let result = tokio::time::timeout(timeout, future).await;
    let duration = start.elapsed().as_secs_f64();

    let (status, final_result) = match result {
        Ok(Ok(value)) => ("success", Ok(value)),
        Ok(Err(e)) if e.is_not_found() => ("not_found", Err(e)),
        Ok(Err(e)) => ("error", Err(e)),
        Err(_elapsed) => (
            "timeout",
            Err(StorageError::QueryTimeout {
                operation: operation.to_string(),
                timeout,
            }),
        ),
    };

    metrics::histogram!(
        QUERY_DURATION_METRIC,
        "operation" => operation,
        "status" => status
    )
    .record(duration);

    if status == "timeout" {
        metrics::counter!(QUERY_TIMEOUT_METRIC, "operation" => operation).increment(1);
        warn!(operation, timeout_ms = timeout.as_millis() as u64, "storage query timed out");
    }

    final_result
}
