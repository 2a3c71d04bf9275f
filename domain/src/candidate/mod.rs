//! Candidate answers produced for one query
//!
//! - [`Candidate`]: one specialist's answer with latency/confidence metadata
//! - [`RankedCandidate`]: a candidate with its score and rank position

pub mod entities;

pub use entities::{Candidate, RankedCandidate};
