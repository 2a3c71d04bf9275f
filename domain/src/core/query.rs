//! Query value object

use crate::orchestration::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Identifier that ties every artefact of one query together (logs, candidates, report).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a caller-supplied identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user query to be answered by the specialist ensemble (Value Object)
///
/// Immutable once built: the Governor hands clones of it to every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<serde_json::Value>,
    correlation_id: CorrelationId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::util::duration_ms::option"
    )]
    budget: Option<Duration>,
}

impl Query {
    /// Create a new query with a generated correlation id and no explicit budget.
    ///
    /// Fails with [`PipelineError::InvalidQuery`] when the text is empty or whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PipelineError::InvalidQuery(
                "query text cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            context: None,
            correlation_id: CorrelationId::generate(),
            budget: None,
        })
    }

    /// Attach structured context. JSON `null` is treated as "no context".
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = if context.is_null() { None } else { Some(context) };
        self
    }

    /// Set a caller-supplied time budget
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Override the generated correlation id
    pub fn with_correlation_id(mut self, id: CorrelationId) -> Self {
        self.correlation_id = id;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> Option<&serde_json::Value> {
        self.context.as_ref()
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// The caller budget, or `default` when none was supplied
    pub fn budget_or(&self, default: Duration) -> Duration {
        self.budget.unwrap_or(default)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
