//! Dispatch use case
//!
//! Fans a query out to every registered specialist and collects whatever
//! candidates arrive before the deadline.

use crate::config::deadline_after;
use crate::ports::observer::PipelineObserver;
use crate::ports::specialist_gateway::{SpecialistGateway, SpecialistRequest};
use crate::use_cases::invoke_specialist::SpecialistClient;
use ensemble_domain::{Candidate, FailureKind, Query, SpecialistId, SpecialistRegistry};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{self, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What one fan-out produced
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    /// In arrival order
    pub candidates: Vec<Candidate>,
    /// One entry per specialist that produced no candidate
    pub failures: BTreeMap<SpecialistId, FailureKind>,
}

impl DispatchOutcome {
    pub fn settled(&self) -> usize {
        self.candidates.len() + self.failures.len()
    }
}

/// Concurrent fan-out with a shared deadline
///
/// In-flight calls live in a [`JoinSet`] keyed back to their specialist, so
/// they can be abandoned as a group when the deadline passes or the caller
/// cancels. Abandoned calls are recorded as failures without waiting for
/// their tasks to wind down.
pub struct Dispatcher<G: SpecialistGateway + 'static> {
    client: SpecialistClient<G>,
    cancellation_grace: Duration,
}

impl<G: SpecialistGateway + 'static> Dispatcher<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            client: SpecialistClient::new(gateway),
            cancellation_grace: Duration::ZERO,
        }
    }

    pub fn with_cancellation_grace(mut self, grace: Duration) -> Self {
        self.cancellation_grace = grace;
        self
    }

    /// Invoke every specialist in `registry` concurrently.
    ///
    /// Returns when all calls settled, when `deadline` plus the cancellation
    /// grace has passed, or when `cancel` fires, whichever comes first.
    /// Never fails: an empty candidate list is for the caller to judge.
    pub async fn dispatch(
        &self,
        query: &Query,
        registry: &SpecialistRegistry,
        deadline: Instant,
        cancel: &CancellationToken,
        observer: &dyn PipelineObserver,
    ) -> DispatchOutcome {
        info!("Dispatching to {} specialists", registry.len());

        let request = Arc::new(SpecialistRequest::from_query(query));
        let mut join_set = JoinSet::new();
        let mut in_flight: HashMap<task::Id, SpecialistId> = HashMap::new();

        for descriptor in registry.iter() {
            let client = self.client.clone();
            let descriptor = descriptor.clone();
            let request = Arc::clone(&request);
            let remaining = deadline.saturating_duration_since(Instant::now());
            let id = descriptor.id.clone();

            let handle = join_set.spawn(async move {
                let result = client.invoke(&descriptor, &request, remaining).await;
                (descriptor.id, result)
            });
            in_flight.insert(handle.id(), id);
        }

        let mut outcome = DispatchOutcome::default();
        let abandon_at = tokio::time::sleep_until(deadline_after(deadline, self.cancellation_grace));
        tokio::pin!(abandon_at);
        let mut cancelled = false;

        while !join_set.is_empty() {
            tokio::select! {
                biased;
                joined = join_set.join_next_with_id() => {
                    let Some(joined) = joined else { break };
                    match joined {
                        Ok((task_id, (id, Ok(candidate)))) => {
                            in_flight.remove(&task_id);
                            debug!("Specialist {} answered in {}ms", id, candidate.latency().as_millis());
                            observer.on_specialist_complete(&id, true);
                            outcome.candidates.push(candidate);
                        }
                        Ok((task_id, (id, Err(kind)))) => {
                            in_flight.remove(&task_id);
                            warn!("Specialist {} failed: {}", id, kind);
                            observer.on_specialist_complete(&id, false);
                            outcome.failures.insert(id, kind);
                        }
                        Err(e) => {
                            if let Some(id) = in_flight.remove(&e.id()) {
                                warn!("Specialist {} task failed: {}", id, e);
                                observer.on_specialist_complete(&id, false);
                                outcome
                                    .failures
                                    .insert(id, FailureKind::InvocationError(format!("task failed: {}", e)));
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                _ = &mut abandon_at => {
                    warn!("Deadline passed with {} specialists still in flight", in_flight.len());
                    break;
                }
            }
        }

        join_set.abort_all();
        let leftover = if cancelled {
            FailureKind::Cancelled
        } else {
            FailureKind::Timeout
        };
        for (_, id) in in_flight.drain() {
            observer.on_specialist_complete(&id, false);
            outcome.failures.insert(id, leftover.clone());
        }

        info!(
            "Dispatch settled: {} candidates, {} failures",
            outcome.candidates.len(),
            outcome.failures.len()
        );
        outcome
    }
}
