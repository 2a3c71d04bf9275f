//! Verification check trait

use super::context::VerificationContext;
use crate::candidate::RankedCandidate;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Fail(String),
}

impl CheckOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }
}

/// One correctness or safety criterion.
///
/// Implementations must be deterministic and hold no mutable state.
pub trait VerificationCheck: Send + Sync + std::fmt::Debug {
    /// Stable name reported in failed verification results
    fn name(&self) -> &'static str;

    fn check(&self, candidate: &RankedCandidate, context: &VerificationContext) -> CheckOutcome;
}
