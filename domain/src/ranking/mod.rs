//! Ranking (critic) stage
//!
//! Scores candidates with a pluggable, pure [`ScoringPolicy`] and orders them
//! into a strict total order. The default [`PriorityFirst`] policy compares,
//! in order:
//!
//! 1. higher priority weight
//! 2. higher confidence (unreported counts as the policy's missing confidence)
//! 3. lower latency
//! 4. lexicographic specialist id
//!
//! [`WeightedConfidence`] puts its `weight × confidence` score ahead of these.
//!
//! Arrival order never matters: the input is fully sorted on recorded fields.

pub mod ranker;
pub mod scoring;

pub use ranker::{Ranker, compare_scored};
pub use scoring::{
    DEFAULT_MISSING_CONFIDENCE, PriorityFirst, ScoringKind, ScoringPolicy, WeightedConfidence,
    effective_confidence,
};
