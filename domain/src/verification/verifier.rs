//! Verifier

use super::check::{CheckOutcome, VerificationCheck};
use super::checks::{CheckSpec, NonEmptyAnswer};
use super::context::VerificationContext;
use super::result::VerificationResult;
use crate::candidate::RankedCandidate;
use std::sync::Arc;

/// Runs an ordered list of checks, stopping at the first failure
#[derive(Debug, Clone)]
pub struct Verifier {
    checks: Vec<Arc<dyn VerificationCheck>>,
}

impl Default for Verifier {
    /// Schema validity only
    fn default() -> Self {
        let checks: Vec<Arc<dyn VerificationCheck>> = vec![Arc::new(NonEmptyAnswer)];
        Self::new(checks)
    }
}

impl Verifier {
    pub fn new(checks: Vec<Arc<dyn VerificationCheck>>) -> Self {
        Self { checks }
    }

    /// Build from configuration entries, preserving their declared order
    pub fn from_specs(specs: &[CheckSpec]) -> Self {
        Self::new(specs.iter().map(CheckSpec::build).collect())
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Verify one candidate. Does not touch the candidate or the ranking.
    pub fn verify(
        &self,
        candidate: &RankedCandidate,
        context: &VerificationContext,
    ) -> VerificationResult {
        let total = self.checks.len();
        for (passed, check) in self.checks.iter().enumerate() {
            if let CheckOutcome::Fail(reason) = check.check(candidate, context) {
                let confidence = passed as f64 / total as f64;
                return VerificationResult::fail(
                    candidate.id().clone(),
                    check.name(),
                    reason,
                    confidence,
                );
            }
        }
        VerificationResult::pass(candidate.id().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::specialist::{SpecialistDescriptor, SpecialistReply};
    use crate::verification::result::Verdict;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn ranked(answer: &str, confidence: Option<f64>) -> RankedCandidate {
        let descriptor = SpecialistDescriptor::new("s", "logic", "static:x");
        let mut reply = SpecialistReply::new(answer);
        reply.confidence = confidence;
        let c = Candidate::new(&descriptor, reply, Duration::from_millis(5), Utc::now());
        RankedCandidate::new(c, 0.5, 1)
    }

    #[derive(Debug, Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl VerificationCheck for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn check(&self, _c: &RankedCandidate, _ctx: &VerificationContext) -> CheckOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CheckOutcome::Pass
        }
    }

    #[test]
    fn test_default_verifier_passes_text() {
        let result = Verifier::default().verify(&ranked("ok", None), &VerificationContext::default());
        assert_eq!(result.verdict, Verdict::Pass);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let counter = Arc::new(Counting::default());
        let checks: Vec<Arc<dyn VerificationCheck>> = vec![
            Arc::new(NonEmptyAnswer),
            CheckSpec::MinConfidence {
                threshold: 0.9,
                require_reported: false,
            }
            .build(),
            counter.clone(),
        ];
        let verifier = Verifier::new(checks);

        let result = verifier.verify(&ranked("ok", Some(0.2)), &VerificationContext::default());
        assert_eq!(result.verdict, Verdict::Fail);
        assert_eq!(result.failed_check.as_deref(), Some("min_confidence"));
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_declared_order_decides_reason() {
        let specs = vec![
            CheckSpec::MaxLength { max_chars: 2 },
            CheckSpec::BlockedTerms {
                terms: vec!["bad".to_string()],
            },
        ];
        let result = Verifier::from_specs(&specs)
            .verify(&ranked("bad answer", None), &VerificationContext::default());
        assert_eq!(result.failed_check.as_deref(), Some("max_length"));

        let reversed: Vec<_> = specs.into_iter().rev().collect();
        let result = Verifier::from_specs(&reversed)
            .verify(&ranked("bad answer", None), &VerificationContext::default());
        assert_eq!(result.failed_check.as_deref(), Some("blocked_terms"));
    }

    #[test]
    fn test_context_changes_verdict() {
        let verifier = Verifier::from_specs(&[CheckSpec::ReferenceTerms]);
        let candidate = ranked("uses tokio", None);
        let empty = VerificationContext::default();
        let strict = VerificationContext::new().with_reference_terms(["rayon"]);
        assert!(verifier.verify(&candidate, &empty).passed());
        assert!(!verifier.verify(&candidate, &strict).passed());
    }

    #[test]
    fn test_no_checks_passes() {
        let result = Verifier::new(vec![]).verify(&ranked("x", None), &VerificationContext::default());
        assert!(result.passed());
    }
}
