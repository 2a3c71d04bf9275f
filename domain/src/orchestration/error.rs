//! Pipeline error taxonomy
//!
//! Only pipeline-exhausting conditions are errors here; per-specialist and
//! per-candidate failures are recorded locally (see [`FailureKind`] and the
//! verification history) and never escalate on their own.

use super::state::{GovernorState, IllegalTransition};
use crate::specialist::{FailureKind, SpecialistId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fatal errors of one query's pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No candidates: all {} specialists failed or timed out", .failures.len())]
    NoCandidates {
        failures: BTreeMap<SpecialistId, FailureKind>,
    },

    /// Internal invariant breach: dispatch must report `NoCandidates` first
    #[error("Ranker received an empty candidate set")]
    EmptyCandidateSet,

    #[error("No verified candidate: all {attempts} ranked candidates failed verification")]
    NoVerifiedCandidate { attempts: usize },

    #[error("Deadline exceeded during {stage} ({candidates_collected} candidates, {attempts} verification attempts)")]
    DeadlineExceeded {
        stage: GovernorState,
        candidates_collected: usize,
        attempts: usize,
    },

    /// The caller abandoned the query before it finished
    #[error("Query cancelled during {stage}")]
    Cancelled { stage: GovernorState },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<IllegalTransition> for PipelineError {
    fn from(err: IllegalTransition) -> Self {
        PipelineError::Internal(err.to_string())
    }
}

/// Stable, machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidQuery,
    NoCandidates,
    EmptyCandidateSet,
    NoVerifiedCandidate,
    DeadlineExceeded,
    Cancelled,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::NoCandidates => "no_candidates",
            ErrorCode::EmptyCandidateSet => "empty_candidate_set",
            ErrorCode::NoVerifiedCandidate => "no_verified_candidate",
            ErrorCode::DeadlineExceeded => "deadline_exceeded",
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured error returned to callers in place of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub reason: String,
    /// Last non-terminal state the run reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_reached: Option<GovernorState>,
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::InvalidQuery(_) => ErrorCode::InvalidQuery,
            PipelineError::NoCandidates { .. } => ErrorCode::NoCandidates,
            PipelineError::EmptyCandidateSet => ErrorCode::EmptyCandidateSet,
            PipelineError::NoVerifiedCandidate { .. } => ErrorCode::NoVerifiedCandidate,
            PipelineError::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
            PipelineError::Cancelled { .. } => ErrorCode::Cancelled,
            PipelineError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether this indicates a bug rather than a user-facing condition
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            PipelineError::EmptyCandidateSet | PipelineError::Internal(_)
        )
    }

    pub fn to_payload(&self, stage_reached: Option<GovernorState>) -> ErrorPayload {
        let reason = match self {
            PipelineError::NoCandidates { failures } if !failures.is_empty() => {
                let detail = failures
                    .iter()
                    .map(|(id, kind)| format!("{}: {}", id, kind))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{} [{}]", self, detail)
            }
            _ => self.to_string(),
        };
        ErrorPayload {
            code: self.code(),
            reason,
            stage_reached,
        }
    }
}
