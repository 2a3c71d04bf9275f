//! Synthesis stage
//!
//! Turns the verified candidate (plus any close-scoring corroborating
//! candidates) into the final [`SynthesizedResponse`] with its evidence trail.

pub mod synthesizer;
pub mod value_objects;

pub use synthesizer::{DEFAULT_CLOSENESS_MARGIN, SynthesisStyle, Synthesizer};
pub use value_objects::{EvidenceEntry, SynthesizedResponse};
