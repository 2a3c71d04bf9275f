//! Pipeline observer port
//!
//! Defines the interface for reporting progress while a query moves
//! through the governor.

use ensemble_domain::{GovernorState, QueryReport, SpecialistId, VerificationResult};

/// Callback for progress updates during a query run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain logs, ...).
pub trait PipelineObserver: Send + Sync {
    /// Called when the governor enters a stage
    fn on_stage(&self, stage: GovernorState, total_tasks: usize);

    /// Called when one specialist invocation settles
    fn on_specialist_complete(&self, specialist: &SpecialistId, success: bool);

    /// Called after each verification attempt
    fn on_verification(&self, _result: &VerificationResult) {}

    /// Called once the run reached a terminal state
    fn on_finished(&self, _report: &QueryReport) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl PipelineObserver for NoObserver {
    fn on_stage(&self, _stage: GovernorState, _total_tasks: usize) {}
    fn on_specialist_complete(&self, _specialist: &SpecialistId, _success: bool) {}
}
