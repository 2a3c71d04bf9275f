//! Invoke Specialist use case
//!
//! One bounded call to one specialist: transport, timeout, schema check.

use crate::ports::specialist_gateway::{SpecialistError, SpecialistGateway, SpecialistRequest};
use chrono::Utc;
use ensemble_domain::{Candidate, FailureKind, SpecialistDescriptor, SpecialistReply};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Wraps a [`SpecialistGateway`] with the per-call contract.
///
/// Every call is bounded by `min(descriptor.timeout, remaining)`, and every
/// reply must pass [`SpecialistReply::from_value`] before it becomes a
/// [`Candidate`]. Failures come back as a [`FailureKind`]; nothing here
/// escalates past the dispatcher.
pub struct SpecialistClient<G: SpecialistGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: SpecialistGateway + 'static> Clone for SpecialistClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: SpecialistGateway + 'static> SpecialistClient<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        request: &SpecialistRequest,
        remaining: Duration,
    ) -> Result<Candidate, FailureKind> {
        let limit = descriptor.timeout.min(remaining);
        if limit.is_zero() {
            return Err(FailureKind::Timeout);
        }

        let started = Instant::now();
        let raw = match tokio::time::timeout(limit, self.gateway.invoke(descriptor, request)).await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(SpecialistError::Timeout)) | Err(_) => {
                debug!(
                    "Specialist {} timed out after {}ms",
                    descriptor.id,
                    limit.as_millis()
                );
                return Err(FailureKind::Timeout);
            }
            Ok(Err(e)) => return Err(FailureKind::InvocationError(e.to_string())),
        };
        let latency = started.elapsed();

        let reply = SpecialistReply::from_value(raw)
            .map_err(|e| FailureKind::InvalidResponse(e.to_string()))?;
        Ok(Candidate::new(descriptor, reply, latency, Utc::now()))
    }
}
