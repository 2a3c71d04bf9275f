//! Execution parameters: query deadline control.
//!
//! [`ExecutionParams`] groups the timing parameters the governor applies to
//! every query. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_QUERY_DEADLINE: Duration = Duration::from_secs(10);
pub const DEFAULT_CANCELLATION_GRACE: Duration = Duration::from_millis(50);

/// Longest span a deadline may be pushed out by. Larger budgets and grace
/// periods are clamped to it.
pub const MAX_DEADLINE_SPAN: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// `start + span` with `span` clamped to [`MAX_DEADLINE_SPAN`].
///
/// Never overflows: if even the clamped span does not fit, `start` itself is
/// returned and the deadline is already due.
pub fn deadline_after(start: Instant, span: Duration) -> Instant {
    start
        .checked_add(span.min(MAX_DEADLINE_SPAN))
        .unwrap_or(start)
}

/// Deadline control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Budget applied when a query does not carry its own.
    pub default_deadline: Duration,
    /// How long in-flight calls may outlive the deadline before they are
    /// abandoned and recorded as timeouts.
    pub cancellation_grace: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            default_deadline: DEFAULT_QUERY_DEADLINE,
            cancellation_grace: DEFAULT_CANCELLATION_GRACE,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn with_cancellation_grace(mut self, grace: Duration) -> Self {
        self.cancellation_grace = grace;
        self
    }
}
