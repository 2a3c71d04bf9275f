//! Per-specialist failure kinds
//!
//! These never abort a dispatch; they are recorded next to the candidates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a single specialist invocation failed
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FailureKind {
    /// The per-call timeout or the query deadline elapsed first
    #[error("timed out")]
    Timeout,

    /// Transport or backend error
    #[error("invocation failed: {0}")]
    InvocationError(String),

    /// The reply did not pass the schema check
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Abandoned because the pipeline terminated
    #[error("cancelled")]
    Cancelled,
}

impl FailureKind {
    /// Name in the pipeline error taxonomy
    pub fn taxonomy_name(&self) -> &'static str {
        match self {
            FailureKind::Timeout | FailureKind::Cancelled => "SpecialistTimeout",
            FailureKind::InvocationError(_) | FailureKind::InvalidResponse(_) => {
                "SpecialistInvocationError"
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FailureKind::Timeout)
    }
}
