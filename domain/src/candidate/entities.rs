//! Candidate entities

use crate::specialist::{CapabilityTag, SpecialistDescriptor, SpecialistId, SpecialistReply};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// One specialist's answer to a query.
///
/// Fields are private: a candidate is never mutated after creation. At most
/// one candidate exists per specialist per query, so the specialist id doubles
/// as the candidate identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    specialist_id: SpecialistId,
    capability: CapabilityTag,
    answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    /// Priority weight copied from the descriptor at dispatch time
    weight: f64,
    #[serde(with = "crate::util::duration_ms")]
    latency: Duration,
    generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Map<String, Value>>,
}

impl Candidate {
    /// Build a candidate from a validated reply
    pub fn new(
        descriptor: &SpecialistDescriptor,
        reply: SpecialistReply,
        latency: Duration,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            specialist_id: descriptor.id.clone(),
            capability: descriptor.capability.clone(),
            answer: reply.answer_text,
            confidence: reply.confidence,
            weight: descriptor.weight,
            latency,
            generated_at,
            metadata: reply.metadata,
        }
    }

    pub fn id(&self) -> &SpecialistId {
        &self.specialist_id
    }

    pub fn specialist_id(&self) -> &SpecialistId {
        &self.specialist_id
    }

    pub fn capability(&self) -> &CapabilityTag {
        &self.capability
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }
}

/// A candidate with its score and 1-based rank.
///
/// Ranks over one query's candidate set form a strict total order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    candidate: Candidate,
    score: f64,
    rank: usize,
}

impl RankedCandidate {
    pub fn new(candidate: Candidate, score: f64, rank: usize) -> Self {
        Self {
            candidate,
            score,
            rank,
        }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn id(&self) -> &SpecialistId {
        self.candidate.id()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn answer(&self) -> &str {
        self.candidate.answer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_copies_descriptor_fields() {
        let descriptor = SpecialistDescriptor::new("coder", "coding", "static:x").with_weight(2.5);
        let reply = SpecialistReply::new("fn main() {}").with_confidence(0.7);
        let now = Utc::now();
        let candidate = Candidate::new(&descriptor, reply, Duration::from_millis(120), now);

        assert_eq!(candidate.id().as_str(), "coder");
        assert_eq!(candidate.capability().as_str(), "coding");
        assert_eq!(candidate.answer(), "fn main() {}");
        assert_eq!(candidate.confidence(), Some(0.7));
        assert_eq!(candidate.weight(), 2.5);
        assert_eq!(candidate.latency(), Duration::from_millis(120));
        assert_eq!(candidate.generated_at(), now);
    }

    #[test]
    fn test_serialize_latency_ms() {
        let descriptor = SpecialistDescriptor::new("a", "logic", "static:x");
        let candidate = Candidate::new(
            &descriptor,
            SpecialistReply::new("yes"),
            Duration::from_millis(42),
            Utc::now(),
        );
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["latency"], 42);
        assert_eq!(json["specialist_id"], "a");
        assert!(json.get("confidence").is_none());
    }
}
