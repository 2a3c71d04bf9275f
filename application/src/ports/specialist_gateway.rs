//! Specialist gateway port
//!
//! Defines the interface for invoking one specialist endpoint.

use async_trait::async_trait;
use ensemble_domain::{CorrelationId, Query, SpecialistDescriptor};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to a specialist
#[derive(Error, Debug)]
pub enum SpecialistError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Could not decode reply: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unsupported endpoint: {0}")]
    UnsupportedEndpoint(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Outbound payload sent to every specialist for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialistRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub correlation_id: CorrelationId,
}

impl SpecialistRequest {
    pub fn from_query(query: &Query) -> Self {
        Self {
            query: query.text().to_string(),
            context: query.context().cloned(),
            correlation_id: query.correlation_id().clone(),
        }
    }
}

/// Gateway for specialist communication
///
/// Returns the raw reply body; schema validation happens in
/// [`SpecialistClient`](crate::use_cases::invoke_specialist::SpecialistClient)
/// so every transport is held to the same contract.
#[async_trait]
pub trait SpecialistGateway: Send + Sync {
    async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        request: &SpecialistRequest,
    ) -> Result<Value, SpecialistError>;
}
