//! Handle Query use case
//!
//! The governor: drives one query through dispatch, ranking, verification
//! with fallback, and synthesis, under a single deadline.

use crate::config::{GovernorConfig, MAX_DEADLINE_SPAN, deadline_after};
use crate::ports::decision_logger::{DecisionLogger, NoDecisionLogger};
use crate::ports::observer::{NoObserver, PipelineObserver};
use crate::ports::specialist_gateway::SpecialistGateway;
use crate::use_cases::dispatch::Dispatcher;
use ensemble_domain::{
    ErrorPayload, FailureKind, GovernorState, GovernorStateMachine, PipelineError, Query,
    QueryOutcome, QueryReport, SpecialistId, SynthesizedResponse, VerificationContext,
    VerificationHistory,
};
use ensemble_domain::util::string::one_line_preview;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Mutable bookkeeping of one run; becomes the [`QueryReport`]
struct RunState {
    machine: GovernorStateMachine,
    history: VerificationHistory,
    failures: BTreeMap<SpecialistId, FailureKind>,
    candidates_collected: usize,
    /// Past this instant every stage fails with `DeadlineExceeded`
    hard_deadline: Instant,
}

impl RunState {
    fn new(hard_deadline: Instant) -> Self {
        Self {
            machine: GovernorStateMachine::new(),
            history: VerificationHistory::new(),
            failures: BTreeMap::new(),
            candidates_collected: 0,
            hard_deadline,
        }
    }

    fn advance(&mut self, to: GovernorState, reason: Option<String>) -> Result<(), PipelineError> {
        debug!("{} -> {}", self.machine.current(), to);
        self.machine.advance(to, reason)?;
        Ok(())
    }

    /// Fails the current stage if the deadline passed or the caller gave up
    fn ensure_live(&self, cancel: &CancellationToken) -> Result<(), PipelineError> {
        let stage = self.machine.current();
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled { stage });
        }
        if Instant::now() > self.hard_deadline {
            return Err(PipelineError::DeadlineExceeded {
                stage,
                candidates_collected: self.candidates_collected,
                attempts: self.history.len(),
            });
        }
        Ok(())
    }
}

/// Use case for answering one query with the specialist ensemble
pub struct HandleQueryUseCase<G: SpecialistGateway + 'static> {
    dispatcher: Dispatcher<G>,
    config: Arc<GovernorConfig>,
    decision_logger: Arc<dyn DecisionLogger>,
}

impl<G: SpecialistGateway + 'static> HandleQueryUseCase<G> {
    pub fn new(gateway: Arc<G>, config: GovernorConfig) -> Self {
        let dispatcher =
            Dispatcher::new(gateway).with_cancellation_grace(config.execution().cancellation_grace);
        Self {
            dispatcher,
            config: Arc::new(config),
            decision_logger: Arc::new(NoDecisionLogger),
        }
    }

    pub fn with_decision_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.decision_logger = logger;
        self
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Answer `text`, or explain in a structured error why not.
    pub async fn handle_query(
        &self,
        text: impl Into<String>,
        context: Option<Value>,
        budget: Option<Duration>,
    ) -> Result<SynthesizedResponse, ErrorPayload> {
        let mut query = Query::new(text).map_err(|e| e.to_payload(None))?;
        if let Some(context) = context {
            query = query.with_context(context);
        }
        if let Some(budget) = budget {
            query = query.with_budget(budget);
        }

        match self.execute(query).await.outcome {
            QueryOutcome::Answered(response) => Ok(response),
            QueryOutcome::Failed(payload) => Err(payload),
        }
    }

    pub async fn execute(&self, query: Query) -> QueryReport {
        self.execute_with(query, &NoObserver, &CancellationToken::new())
            .await
    }

    /// Run the full pipeline and report everything that happened.
    ///
    /// Cancelling `cancel` abandons in-flight specialist calls and ends the
    /// run in `Failed` with a `cancelled` error.
    pub async fn execute_with(
        &self,
        query: Query,
        observer: &dyn PipelineObserver,
        cancel: &CancellationToken,
    ) -> QueryReport {
        let span = info_span!("query", correlation_id = %query.correlation_id());
        async move {
            let started = Instant::now();
            let execution = self.config.execution();
            let budget = query.budget_or(execution.default_deadline).min(MAX_DEADLINE_SPAN);
            let deadline = deadline_after(started, budget);
            info!(
                "Query received ({} specialists, budget {}ms)",
                self.config.registry().len(),
                budget.as_millis()
            );

            let mut run = RunState::new(deadline_after(deadline, execution.cancellation_grace));
            let outcome = match self
                .run_pipeline(&query, deadline, &mut run, observer, cancel)
                .await
            {
                Ok(response) => {
                    info!("Query answered from {:?}", response.built_from);
                    QueryOutcome::Answered(response)
                }
                Err(err) => {
                    let stage = run.machine.current();
                    if err.is_internal() {
                        error!("Query failed during {}: {}", stage, err);
                    } else {
                        warn!("Query failed during {}: {}", stage, err);
                    }
                    run.machine.fail(err.to_string());
                    QueryOutcome::Failed(err.to_payload(Some(stage)))
                }
            };

            let report = QueryReport {
                correlation_id: query.correlation_id().clone(),
                query: query.text().to_string(),
                outcome,
                final_state: run.machine.current(),
                attempts: run.history.len(),
                verification: run.history,
                failures: run.failures,
                transitions: run.machine.into_transitions(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            self.decision_logger.record(&report);
            observer.on_finished(&report);
            report
        }
        .instrument(span)
        .await
    }

    async fn run_pipeline(
        &self,
        query: &Query,
        deadline: Instant,
        run: &mut RunState,
        observer: &dyn PipelineObserver,
        cancel: &CancellationToken,
    ) -> Result<SynthesizedResponse, PipelineError> {
        let registry = self.config.registry();

        // Dispatching
        observer.on_stage(GovernorState::Dispatching, registry.len());
        let outcome = self
            .dispatcher
            .dispatch(query, registry, deadline, cancel, observer)
            .await;
        run.failures = outcome.failures;
        run.candidates_collected = outcome.candidates.len();
        run.ensure_live(cancel)?;
        if outcome.candidates.is_empty() {
            return Err(PipelineError::NoCandidates {
                failures: run.failures.clone(),
            });
        }

        // Ranking
        run.advance(
            GovernorState::Ranking,
            Some(format!(
                "{} candidates, {} failures",
                run.candidates_collected,
                run.failures.len()
            )),
        )?;
        run.ensure_live(cancel)?;
        observer.on_stage(GovernorState::Ranking, run.candidates_collected);
        let ranked = self.config.ranker().rank(outcome.candidates)?;

        // Verifying, falling back down the ranking
        let context = VerificationContext::from_query(query);
        let verifier = self.config.verifier();
        observer.on_stage(GovernorState::Verifying, ranked.len());
        let mut verified = None;
        for candidate in &ranked {
            let reason = match run.history.last() {
                None => None,
                Some(previous) => Some(format!(
                    "{} rejected, falling back to rank {}",
                    previous.candidate_id,
                    candidate.rank()
                )),
            };
            run.advance(GovernorState::Verifying, reason)?;
            run.ensure_live(cancel)?;

            let result = verifier.verify(candidate, &context);
            let attempt = run.history.record(result.clone());
            observer.on_verification(&result);
            if result.passed() {
                debug!(
                    "Attempt {}: {} verified: {}",
                    attempt,
                    candidate.id(),
                    one_line_preview(candidate.answer(), 80)
                );
                verified = Some(candidate);
                break;
            }
            info!(
                "Attempt {}: {} rejected by {}: {}",
                attempt,
                candidate.id(),
                result.failed_check.as_deref().unwrap_or("verifier"),
                result.failure_reason.as_deref().unwrap_or("no reason given")
            );
        }
        let Some(verified) = verified else {
            return Err(PipelineError::NoVerifiedCandidate {
                attempts: run.history.len(),
            });
        };

        // Synthesizing
        run.advance(GovernorState::Synthesizing, None)?;
        run.ensure_live(cancel)?;
        observer.on_stage(GovernorState::Synthesizing, 1);
        let response = self
            .config
            .synthesizer()
            .synthesize(verified, &ranked, &run.history);

        run.advance(GovernorState::Done, None)?;
        Ok(response)
    }
}
