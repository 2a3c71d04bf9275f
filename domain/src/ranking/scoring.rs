//! Scoring policies

use crate::candidate::Candidate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Confidence assumed for candidates whose specialist reported none
pub const DEFAULT_MISSING_CONFIDENCE: f64 = 0.5;

/// A pure quality metric: same candidate, same score. Higher is better.
pub trait ScoringPolicy: Send + Sync + std::fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn score(&self, candidate: &Candidate) -> f64;

    /// Confidence standing in for an unreported one, in `score` and in tie-breaks alike
    fn missing_confidence(&self) -> f64 {
        DEFAULT_MISSING_CONFIDENCE
    }

    /// When true the priority weight is compared before the score
    fn weight_first(&self) -> bool {
        false
    }
}

/// Reported confidence, or the policy's stand-in when there is none
pub fn effective_confidence(candidate: &Candidate, missing_confidence: f64) -> f64 {
    candidate.confidence().unwrap_or(missing_confidence)
}

fn clamp_missing(missing_confidence: f64) -> f64 {
    if missing_confidence.is_finite() {
        missing_confidence.clamp(0.0, 1.0)
    } else {
        DEFAULT_MISSING_CONFIDENCE
    }
}

/// `weight × confidence`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedConfidence {
    missing_confidence: f64,
}

impl WeightedConfidence {
    pub fn new(missing_confidence: f64) -> Self {
        Self {
            missing_confidence: clamp_missing(missing_confidence),
        }
    }
}

impl Default for WeightedConfidence {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_CONFIDENCE)
    }
}

impl ScoringPolicy for WeightedConfidence {
    fn name(&self) -> &'static str {
        "weighted_confidence"
    }

    fn score(&self, candidate: &Candidate) -> f64 {
        candidate.weight() * effective_confidence(candidate, self.missing_confidence)
    }

    fn missing_confidence(&self) -> f64 {
        self.missing_confidence
    }
}

/// Priority weight first, then confidence, then latency (default policy).
///
/// The score is the effective confidence, so the synthesis closeness margin
/// compares how sure candidates are rather than their configured weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityFirst {
    missing_confidence: f64,
}

impl PriorityFirst {
    pub fn new(missing_confidence: f64) -> Self {
        Self {
            missing_confidence: clamp_missing(missing_confidence),
        }
    }
}

impl Default for PriorityFirst {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_CONFIDENCE)
    }
}

impl ScoringPolicy for PriorityFirst {
    fn name(&self) -> &'static str {
        "priority_first"
    }

    fn score(&self, candidate: &Candidate) -> f64 {
        effective_confidence(candidate, self.missing_confidence)
    }

    fn missing_confidence(&self) -> f64 {
        self.missing_confidence
    }

    fn weight_first(&self) -> bool {
        true
    }
}

/// Configurable selector for the built-in policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringKind {
    #[default]
    PriorityFirst,
    WeightedConfidence,
}

impl ScoringKind {
    pub fn into_policy(self, missing_confidence: f64) -> Arc<dyn ScoringPolicy> {
        match self {
            ScoringKind::WeightedConfidence => Arc::new(WeightedConfidence::new(missing_confidence)),
            ScoringKind::PriorityFirst => Arc::new(PriorityFirst::new(missing_confidence)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringKind::WeightedConfidence => "weighted_confidence",
            ScoringKind::PriorityFirst => "priority_first",
        }
    }
}

impl std::str::FromStr for ScoringKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "weighted_confidence" | "weighted" => Ok(ScoringKind::WeightedConfidence),
            "priority_first" | "priority" => Ok(ScoringKind::PriorityFirst),
            other => Err(format!(
                "Unknown scoring policy: {}. Valid: priority_first, weighted_confidence",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialist::{SpecialistDescriptor, SpecialistReply};
    use chrono::Utc;
    use std::time::Duration;

    fn candidate(weight: f64, confidence: Option<f64>) -> Candidate {
        let descriptor = SpecialistDescriptor::new("s", "logic", "static:x").with_weight(weight);
        let mut reply = SpecialistReply::new("answer");
        reply.confidence = confidence;
        Candidate::new(&descriptor, reply, Duration::from_millis(10), Utc::now())
    }

    #[test]
    fn test_weighted_confidence() {
        let policy = WeightedConfidence::default();
        assert!((policy.score(&candidate(2.0, Some(0.4))) - 0.8).abs() < 1e-12);
        assert!((policy.score(&candidate(1.0, None)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_confidence_clamped() {
        assert_eq!(WeightedConfidence::new(3.0).missing_confidence(), 1.0);
        assert_eq!(
            WeightedConfidence::new(f64::NAN).missing_confidence(),
            DEFAULT_MISSING_CONFIDENCE
        );
    }

    #[test]
    fn test_priority_first_scores_confidence_and_orders_by_weight() {
        let policy = PriorityFirst::default();
        assert!(policy.weight_first());
        assert_eq!(policy.score(&candidate(3.0, Some(0.1))), 0.1);
        assert_eq!(policy.score(&candidate(3.0, None)), DEFAULT_MISSING_CONFIDENCE);
    }

    #[test]
    fn test_default_kind_is_priority_first() {
        assert_eq!(ScoringKind::default(), ScoringKind::PriorityFirst);
        assert_eq!(ScoringKind::default().into_policy(0.5).name(), "priority_first");
    }

    #[test]
    fn test_policies_share_missing_confidence() {
        let weighted = ScoringKind::WeightedConfidence.into_policy(0.3);
        let priority = ScoringKind::PriorityFirst.into_policy(0.3);
        assert_eq!(weighted.missing_confidence(), 0.3);
        assert_eq!(priority.missing_confidence(), 0.3);
        assert!((weighted.score(&candidate(1.0, None)) - 0.3).abs() < 1e-12);
        assert!((priority.score(&candidate(2.0, None)) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_scoring_kind_parse() {
        assert_eq!("weighted".parse::<ScoringKind>(), Ok(ScoringKind::WeightedConfidence));
        assert_eq!("priority-first".parse::<ScoringKind>(), Ok(ScoringKind::PriorityFirst));
        assert!("random".parse::<ScoringKind>().is_err());
        assert_eq!(ScoringKind::PriorityFirst.into_policy(0.5).name(), "priority_first");
    }
}
