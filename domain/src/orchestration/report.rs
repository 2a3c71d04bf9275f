//! Per-query report returned by the governor

use super::error::ErrorPayload;
use super::state::{GovernorState, TransitionRecord};
use crate::core::query::CorrelationId;
use crate::specialist::{FailureKind, SpecialistId};
use crate::synthesis::SynthesizedResponse;
use crate::verification::VerificationHistory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Either the synthesized response or a structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Answered(SynthesizedResponse),
    Failed(ErrorPayload),
}

/// Everything observable about one query's run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub correlation_id: CorrelationId,
    pub query: String,
    pub outcome: QueryOutcome,
    pub final_state: GovernorState,
    /// Number of verification attempts made
    pub attempts: usize,
    pub verification: VerificationHistory,
    /// Specialists that produced no candidate, and why
    pub failures: BTreeMap<SpecialistId, FailureKind>,
    pub transitions: Vec<TransitionRecord>,
    pub elapsed_ms: u64,
}

impl QueryReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Answered(_))
    }

    pub fn response(&self) -> Option<&SynthesizedResponse> {
        match &self.outcome {
            QueryOutcome::Answered(r) => Some(r),
            QueryOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        match &self.outcome {
            QueryOutcome::Answered(_) => None,
            QueryOutcome::Failed(e) => Some(e),
        }
    }
}
