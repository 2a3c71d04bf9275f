//! Ranker

use super::scoring::{PriorityFirst, ScoringPolicy, effective_confidence};
use crate::candidate::{Candidate, RankedCandidate};
use crate::orchestration::error::PipelineError;
use std::cmp::Ordering;
use std::sync::Arc;

/// Orders a candidate set with a pluggable scoring policy
#[derive(Debug, Clone)]
pub struct Ranker {
    policy: Arc<dyn ScoringPolicy>,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Arc::new(PriorityFirst::default()))
    }
}

impl Ranker {
    pub fn new(policy: Arc<dyn ScoringPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Score and sort. Rank 1 is the best candidate.
    ///
    /// Fails with [`PipelineError::EmptyCandidateSet`] on empty input; the
    /// dispatcher should already have reported `NoCandidates` in that case.
    pub fn rank(&self, candidates: Vec<Candidate>) -> Result<Vec<RankedCandidate>, PipelineError> {
        if candidates.is_empty() {
            return Err(PipelineError::EmptyCandidateSet);
        }

        let mut scored: Vec<(Candidate, f64)> = candidates
            .into_iter()
            .map(|c| {
                let score = sanitize(self.policy.score(&c));
                (c, score)
            })
            .collect();

        let policy = self.policy.as_ref();
        scored.sort_by(|(a, sa), (b, sb)| compare_scored(policy, a, *sa, b, *sb));

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(i, (c, score))| RankedCandidate::new(c, score, i + 1))
            .collect())
    }
}

/// Comparator behind [`Ranker::rank`]: `Less` means `a` ranks ahead of `b`.
///
/// Score and weight come first, in the order the policy asks for; then
/// effective confidence, latency and specialist id.
pub fn compare_scored(
    policy: &dyn ScoringPolicy,
    a: &Candidate,
    a_score: f64,
    b: &Candidate,
    b_score: f64,
) -> Ordering {
    let by_score = b_score.total_cmp(&a_score);
    let by_weight = b.weight().total_cmp(&a.weight());
    let primary = if policy.weight_first() {
        by_weight.then(by_score)
    } else {
        by_score.then(by_weight)
    };

    let missing = policy.missing_confidence();
    primary
        .then_with(|| {
            effective_confidence(b, missing).total_cmp(&effective_confidence(a, missing))
        })
        .then_with(|| a.latency().cmp(&b.latency()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Non-finite scores count as zero; `-0.0` is folded into `0.0`.
fn sanitize(score: f64) -> f64 {
    if score.is_finite() { score + 0.0 } else { 0.0 }
}
