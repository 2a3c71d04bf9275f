//! Synthesis value objects

use crate::specialist::SpecialistId;
use crate::verification::Verdict;
use serde::{Deserialize, Serialize};

/// One line of the evidence trail: a candidate that was considered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub specialist_id: SpecialistId,
    pub score: f64,
    pub rank: usize,
    /// Whether the answer is built from this candidate: the verified one, or a
    /// corroborating one within the closeness margin. Corroborating text only
    /// appears in the answer under the annotated style.
    pub included: bool,
    /// Latest verification verdict, if the candidate was verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

/// Final answer of one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedResponse {
    pub answer: String,
    /// Verified candidate first, then the candidates corroborating it
    pub built_from: Vec<SpecialistId>,
    /// Every ranked candidate in rank order
    pub evidence: Vec<EvidenceEntry>,
}

impl SynthesizedResponse {
    /// The verified candidate the answer is primarily built from
    pub fn primary(&self) -> Option<&SpecialistId> {
        self.built_from.first()
    }

    pub fn included(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.evidence.iter().filter(|e| e.included)
    }
}
