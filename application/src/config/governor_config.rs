//! Governor configuration container.
//!
//! [`GovernorConfig`] groups everything a query run needs that is fixed at
//! startup: the specialist registry, the ranking, verification and synthesis
//! policies, and the deadline parameters. It is built once (usually by the
//! infrastructure config loader) and shared read-only across queries.

use crate::config::ExecutionParams;
use ensemble_domain::{Ranker, SpecialistRegistry, Synthesizer, Verifier};

#[derive(Debug, Clone)]
pub struct GovernorConfig {
    registry: SpecialistRegistry,
    ranker: Ranker,
    verifier: Verifier,
    synthesizer: Synthesizer,
    execution: ExecutionParams,
}

impl GovernorConfig {
    /// Default policies around the given registry.
    pub fn new(registry: SpecialistRegistry) -> Self {
        Self {
            registry,
            ranker: Ranker::default(),
            verifier: Verifier::default(),
            synthesizer: Synthesizer::default(),
            execution: ExecutionParams::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_verifier(mut self, verifier: Verifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Synthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    // ==================== Accessors ====================

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    pub fn execution(&self) -> &ExecutionParams {
        &self.execution
    }
}
