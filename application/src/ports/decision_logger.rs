//! Port for structured decision logging.
//!
//! Defines the [`DecisionLogger`] trait for recording how each query was
//! decided (candidates, verification attempts, transitions, outcome).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures one machine-readable
//! record per query (JSONL in the infrastructure adapter).

use ensemble_domain::QueryReport;

/// Port for persisting per-query decision records.
///
/// `record` is synchronous and non-fallible; adapters swallow their own
/// I/O errors so that a full disk never fails a query.
pub trait DecisionLogger: Send + Sync {
    fn record(&self, report: &QueryReport);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDecisionLogger;

impl DecisionLogger for NoDecisionLogger {
    fn record(&self, _report: &QueryReport) {}
}
