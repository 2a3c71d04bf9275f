//! Synthesizer

use super::value_objects::{EvidenceEntry, SynthesizedResponse};
use crate::candidate::RankedCandidate;
use crate::verification::VerificationHistory;
use serde::{Deserialize, Serialize};

/// Default score window for ensemble agreement
pub const DEFAULT_CLOSENESS_MARGIN: f64 = 0.05;

/// How corroborating candidates show up in the answer text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStyle {
    /// Answer text is the verified candidate's; corroboration only in the trail
    #[default]
    Primary,
    /// Distinct corroborating answers are appended after the primary answer
    Annotated,
}

impl std::str::FromStr for SynthesisStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(SynthesisStyle::Primary),
            "annotated" => Ok(SynthesisStyle::Annotated),
            other => Err(format!(
                "Unknown synthesis style: {}. Valid: primary, annotated",
                other
            )),
        }
    }
}

/// Builds the final response. Deterministic, no external calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synthesizer {
    closeness_margin: f64,
    style: SynthesisStyle,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSENESS_MARGIN)
    }
}

impl Synthesizer {
    /// Negative or non-finite margins are treated as zero
    pub fn new(closeness_margin: f64) -> Self {
        let closeness_margin = if closeness_margin.is_finite() && closeness_margin > 0.0 {
            closeness_margin
        } else {
            0.0
        };
        Self {
            closeness_margin,
            style: SynthesisStyle::default(),
        }
    }

    pub fn with_style(mut self, style: SynthesisStyle) -> Self {
        self.style = style;
        self
    }

    pub fn closeness_margin(&self) -> f64 {
        self.closeness_margin
    }

    pub fn style(&self) -> SynthesisStyle {
        self.style
    }

    /// Build the response from the verified candidate.
    ///
    /// Other candidates whose score lies within the closeness margin of the
    /// verified one corroborate it, unless verification rejected them.
    pub fn synthesize(
        &self,
        verified: &RankedCandidate,
        ranked: &[RankedCandidate],
        history: &VerificationHistory,
    ) -> SynthesizedResponse {
        let corroborating: Vec<&RankedCandidate> = ranked
            .iter()
            .filter(|c| c.id() != verified.id())
            .filter(|c| !history.was_rejected(c.id()))
            .filter(|c| (verified.score() - c.score()).abs() <= self.closeness_margin)
            .collect();

        let mut built_from = vec![verified.id().clone()];
        built_from.extend(corroborating.iter().map(|c| c.id().clone()));

        let evidence = ranked
            .iter()
            .map(|c| EvidenceEntry {
                specialist_id: c.id().clone(),
                score: c.score(),
                rank: c.rank(),
                included: built_from.contains(c.id()),
                verdict: history.latest_verdict(c.id()),
            })
            .collect();

        let answer = match self.style {
            SynthesisStyle::Primary => verified.answer().to_string(),
            SynthesisStyle::Annotated => Self::annotate(verified, &corroborating),
        };

        SynthesizedResponse {
            answer,
            built_from,
            evidence,
        }
    }

    fn annotate(verified: &RankedCandidate, corroborating: &[&RankedCandidate]) -> String {
        let primary = verified.answer().trim();
        let mut answer = primary.to_string();
        let distinct: Vec<&&RankedCandidate> = corroborating
            .iter()
            .filter(|c| c.answer().trim() != primary)
            .collect();
        if !distinct.is_empty() {
            answer.push_str("\n\nCorroborating answers:");
            for c in distinct {
                answer.push_str(&format!("\n\n[{}] {}", c.id(), c.answer().trim()));
            }
        }
        answer
    }
}
