//! Built-in verification checks and their configuration form

use super::check::{CheckOutcome, VerificationCheck};
use super::context::VerificationContext;
use crate::candidate::RankedCandidate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Schema validity: the answer must contain non-whitespace text
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyAnswer;

impl VerificationCheck for NonEmptyAnswer {
    fn name(&self) -> &'static str {
        "non_empty"
    }

    fn check(&self, candidate: &RankedCandidate, _context: &VerificationContext) -> CheckOutcome {
        if candidate.answer().trim().is_empty() {
            CheckOutcome::Fail("answer is empty".to_string())
        } else {
            CheckOutcome::Pass
        }
    }
}

/// Rejects answers whose specialist-reported confidence is below a threshold.
///
/// Unreported confidence passes unless `require_reported` is set.
#[derive(Debug, Clone, Copy)]
pub struct MinConfidence {
    pub threshold: f64,
    pub require_reported: bool,
}

impl VerificationCheck for MinConfidence {
    fn name(&self) -> &'static str {
        "min_confidence"
    }

    fn check(&self, candidate: &RankedCandidate, _context: &VerificationContext) -> CheckOutcome {
        match candidate.candidate().confidence() {
            Some(c) if c < self.threshold => CheckOutcome::Fail(format!(
                "confidence {:.2} below threshold {:.2}",
                c, self.threshold
            )),
            None if self.require_reported => {
                CheckOutcome::Fail("specialist reported no confidence".to_string())
            }
            _ => CheckOutcome::Pass,
        }
    }
}

/// Policy/safety filter: the answer must not contain any blocked term
#[derive(Debug, Clone)]
pub struct BlockedTerms {
    terms: Vec<String>,
}

impl BlockedTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(Into::<String>::into)
                .map(|t| t.to_lowercase())
                .filter(|t| !t.trim().is_empty())
                .collect(),
        }
    }
}

impl VerificationCheck for BlockedTerms {
    fn name(&self) -> &'static str {
        "blocked_terms"
    }

    fn check(&self, candidate: &RankedCandidate, _context: &VerificationContext) -> CheckOutcome {
        let answer = candidate.answer().to_lowercase();
        match self.terms.iter().find(|t| answer.contains(t.as_str())) {
            Some(term) => CheckOutcome::Fail(format!("answer contains blocked term '{}'", term)),
            None => CheckOutcome::Pass,
        }
    }
}

/// Rejects answers longer than `max_chars` characters
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    pub max_chars: usize,
}

impl VerificationCheck for MaxLength {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn check(&self, candidate: &RankedCandidate, _context: &VerificationContext) -> CheckOutcome {
        let len = candidate.answer().chars().count();
        if len > self.max_chars {
            CheckOutcome::Fail(format!(
                "answer has {} characters (max {})",
                len, self.max_chars
            ))
        } else {
            CheckOutcome::Pass
        }
    }
}

/// Cross-check against the caller's reference: every reference term must
/// appear in the answer. Passes when the context carries no terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceTerms;

impl VerificationCheck for ReferenceTerms {
    fn name(&self) -> &'static str {
        "reference_terms"
    }

    fn check(&self, candidate: &RankedCandidate, context: &VerificationContext) -> CheckOutcome {
        let answer = candidate.answer().to_lowercase();
        let missing: Vec<&str> = context
            .reference_terms
            .iter()
            .filter(|t| !answer.contains(&t.to_lowercase()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail(format!("missing reference terms: {}", missing.join(", ")))
        }
    }
}

/// Declarative check entry as it appears in configuration
///
/// ```toml
/// [[verification.checks]]
/// kind = "min_confidence"
/// threshold = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckSpec {
    NonEmpty,
    MinConfidence {
        threshold: f64,
        #[serde(default)]
        require_reported: bool,
    },
    BlockedTerms {
        terms: Vec<String>,
    },
    MaxLength {
        max_chars: usize,
    },
    ReferenceTerms,
}

impl CheckSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckSpec::NonEmpty => "non_empty",
            CheckSpec::MinConfidence { .. } => "min_confidence",
            CheckSpec::BlockedTerms { .. } => "blocked_terms",
            CheckSpec::MaxLength { .. } => "max_length",
            CheckSpec::ReferenceTerms => "reference_terms",
        }
    }

    pub fn build(&self) -> Arc<dyn VerificationCheck> {
        match self {
            CheckSpec::NonEmpty => Arc::new(NonEmptyAnswer),
            CheckSpec::MinConfidence {
                threshold,
                require_reported,
            } => Arc::new(MinConfidence {
                threshold: *threshold,
                require_reported: *require_reported,
            }),
            CheckSpec::BlockedTerms { terms } => Arc::new(BlockedTerms::new(terms.iter().cloned())),
            CheckSpec::MaxLength { max_chars } => Arc::new(MaxLength {
                max_chars: *max_chars,
            }),
            CheckSpec::ReferenceTerms => Arc::new(ReferenceTerms),
        }
    }

    /// Problems with the parameters, if any
    pub fn parameter_error(&self) -> Option<String> {
        match self {
            CheckSpec::MinConfidence { threshold, .. }
                if !threshold.is_finite() || !(0.0..=1.0).contains(threshold) =>
            {
                Some(format!("threshold must be in [0, 1], got {}", threshold))
            }
            CheckSpec::MaxLength { max_chars: 0 } => Some("max_chars must be > 0".to_string()),
            CheckSpec::BlockedTerms { terms } if terms.iter().all(|t| t.trim().is_empty()) => {
                Some("terms must contain at least one non-empty entry".to_string())
            }
            _ => None,
        }
    }
}
