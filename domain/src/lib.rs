//! Domain layer for ensemble-governor
//!
//! This crate contains the pure parts of the pipeline: value objects, the
//! ranking, verification and synthesis stages, and the governor's state
//! machine. It performs no I/O and has no async code.
//!
//! # Pipeline
//!
//! ```text
//! Query ──▶ Dispatch ──▶ Rank ──▶ Verify ──▶ Synthesize ──▶ SynthesizedResponse
//!                                  │   ▲
//!                                  └───┘ rejection: next-ranked candidate
//! ```
//!
//! Dispatch is async and lives in `ensemble-application`; every other stage
//! is a plain function of its inputs and is defined here.

pub mod candidate;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod ranking;
pub mod specialist;
pub mod synthesis;
pub mod util;
pub mod verification;

// Re-export commonly used types
pub use candidate::{Candidate, RankedCandidate};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::query::{CorrelationId, Query};
pub use orchestration::{
    ErrorCode, ErrorPayload, GovernorState, GovernorStateMachine, IllegalTransition,
    PipelineError, QueryOutcome, QueryReport, TransitionRecord,
};
pub use ranking::{PriorityFirst, Ranker, ScoringKind, ScoringPolicy, WeightedConfidence};
pub use specialist::{
    CapabilityTag, FailureKind, RegistryError, ReplyError, SpecialistDescriptor, SpecialistId,
    SpecialistRegistry, SpecialistReply,
};
pub use synthesis::{EvidenceEntry, SynthesisStyle, SynthesizedResponse, Synthesizer};
pub use verification::{
    CheckOutcome, CheckSpec, VerificationCheck, VerificationContext, VerificationHistory,
    VerificationResult, Verdict, Verifier,
};
