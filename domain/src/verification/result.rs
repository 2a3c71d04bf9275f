//! Verification results and attempt history

use crate::specialist::SpecialistId;
use serde::{Deserialize, Serialize};

/// Pass/fail verdict of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of verifying one candidate once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub candidate_id: SpecialistId,
    pub verdict: Verdict,
    /// Reason given by the first failing check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Name of the first failing check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_check: Option<String>,
    /// Share of declared checks that passed before the verdict (0.0 to 1.0)
    pub confidence: f64,
}

impl VerificationResult {
    pub fn pass(candidate_id: SpecialistId) -> Self {
        Self {
            candidate_id,
            verdict: Verdict::Pass,
            failure_reason: None,
            failed_check: None,
            confidence: 1.0,
        }
    }

    pub fn fail(
        candidate_id: SpecialistId,
        check: impl Into<String>,
        reason: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            candidate_id,
            verdict: Verdict::Fail,
            failure_reason: Some(reason.into()),
            failed_check: Some(check.into()),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Append-only record of every verification attempt for one query.
///
/// Entries are never overwritten, so an earlier rejection stays inspectable
/// even if the same candidate is later verified again with other context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationHistory {
    attempts: Vec<VerificationResult>,
}

impl VerificationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result and return its 1-based attempt number
    pub fn record(&mut self, result: VerificationResult) -> usize {
        self.attempts.push(result);
        self.attempts.len()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerificationResult> {
        self.attempts.iter()
    }

    pub fn last(&self) -> Option<&VerificationResult> {
        self.attempts.last()
    }

    /// All attempts made for one candidate, oldest first
    pub fn for_candidate<'a>(
        &'a self,
        id: &'a SpecialistId,
    ) -> impl Iterator<Item = &'a VerificationResult> + 'a {
        self.attempts.iter().filter(move |r| &r.candidate_id == id)
    }

    /// Whether any attempt rejected this candidate
    pub fn was_rejected(&self, id: &SpecialistId) -> bool {
        self.for_candidate(id).any(|r| !r.passed())
    }

    /// Latest verdict for this candidate, if it was ever verified
    pub fn latest_verdict(&self, id: &SpecialistId) -> Option<Verdict> {
        self.for_candidate(id).last().map(|r| r.verdict)
    }
}
