//! Orchestration domain
//!
//! The governor's state machine, the fatal error taxonomy and the per-query
//! report. The async sequencing itself lives in the application layer.

pub mod error;
pub mod report;
pub mod state;

pub use error::{ErrorCode, ErrorPayload, PipelineError};
pub use report::{QueryOutcome, QueryReport};
pub use state::{GovernorState, GovernorStateMachine, IllegalTransition, TransitionRecord};
