//! Backend call accounting.
//!
//! Validation reports every model read it issues to a [`DbCallCounter`].
//! Counting is a side effect only and can never fail a validation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metric name used by [`MetricsDbCallCounter`].
pub const DB_READ_CALLS_METRIC: &str = "tuplegate_db_read_calls_total";

/// Sink for backend call events.
pub trait DbCallCounter: Send + Sync {
    /// Records one backend read.
    fn add_read_call(&self);
}

impl<T: DbCallCounter + ?Sized> DbCallCounter for Arc<T> {
    fn add_read_call(&self) {
        (**self).add_read_call();
    }
}

/// Counts reads in memory, typically one instance per request.
#[derive(Debug, Default)]
pub struct AtomicDbCallCounter {
    reads: AtomicU64,
}

impl AtomicDbCallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reads recorded so far.
    pub fn read_calls(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

impl DbCallCounter for AtomicDbCallCounter {
    fn add_read_call(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDbCallCounter;

impl DbCallCounter for NoopDbCallCounter {
    fn add_read_call(&self) {}
}

/// Forwards reads to the `metrics` facade as `tuplegate_db_read_calls_total`.
///
/// Without an installed recorder the increments are dropped.
#[derive(Debug, Clone)]
pub struct MetricsDbCallCounter {
    operation: &'static str,
}

impl MetricsDbCallCounter {
    /// Creates a counter labelled with the calling `operation` (e.g. "write").
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

impl DbCallCounter for MetricsDbCallCounter {
    fn add_read_call(&self) {
        metrics::counter!(DB_READ_CALLS_METRIC, "operation" => self.operation).increment(1);
    }
}

/// Registers the description of the read-call metric.
pub fn register_counter_metrics() {
    metrics::describe_counter!(
        DB_READ_CALLS_METRIC,
        "Total number of model reads issued by tuple validation"
    );
}
